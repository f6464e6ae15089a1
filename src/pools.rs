// 📚 Value Pools - fixed reference tables for the generator
// Built once at startup and shared read-only (Arc) by every generator

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ============================================================================
// VALUE POOLS
// ============================================================================

#[derive(Debug, Clone)]
pub struct ValuePools {
    /// Single-character surnames
    pub surnames: Vec<String>,

    /// Single-character given-name fragments (1-2 are drawn per name)
    pub given_names: Vec<String>,

    /// Taiwanese city/district strings
    pub addresses: Vec<String>,

    pub email_domains: Vec<String>,

    // Medical history categories
    pub allergies: Vec<String>,
    pub chronic_diseases: Vec<String>,
    pub medications: Vec<String>,
    pub surgeries: Vec<String>,
    pub family_history: Vec<String>,
}

/// Upper bounds (inclusive) for the number of items drawn per category
pub const MAX_ALLERGIES: usize = 3;
pub const MAX_CHRONIC_DISEASES: usize = 2;
pub const MAX_MEDICATIONS: usize = 3;
pub const MAX_SURGERIES: usize = 2;
pub const MAX_FAMILY_HISTORY: usize = 3;

impl ValuePools {
    pub fn new() -> Self {
        ValuePools {
            surnames: strings(&[
                "趙", "錢", "孫", "李", "週", "吳", "鄭", "王", "馮", "陳", "褚", "衛",
                "蔣", "沈", "韓", "楊", "朱", "秦", "尤", "許", "何", "呂", "施", "張",
                "孔", "曹", "嚴", "華", "金", "魏", "陶", "姜", "戚", "謝", "鄒", "喻",
                "柏", "水", "竇", "章", "雲", "蘇", "潘", "葛", "奚", "範", "彭", "郎",
                "魯", "韋", "昌", "馬", "苗", "鳳", "花", "方", "俞", "任", "袁", "柳",
                "酆", "鮑", "史", "唐", "費", "廉", "岑", "薛", "雷", "賀", "倪", "湯",
            ]),
            given_names: strings(&[
                "家", "珈", "貝", "楠", "希", "辛", "潁", "英", "敬", "莫", "群", "海",
                "渲", "兒", "與", "釣", "怡", "艾", "雪", "安", "愛", "書", "牛", "新",
                "婷", "鐺", "妙", "晴", "葶", "歡", "羊", "娜", "瀟", "奧", "末", "城",
                "圖", "星", "天", "敏", "銘", "君", "豪", "偉", "然", "軒", "萱", "涵",
                "翔", "廷", "恩", "辰", "睿", "宇", "妍", "彤", "妤", "語", "綺", "俠",
                "飛", "丁", "寧", "點", "彬", "傑", "美", "叮", "熊", "苗", "東", "奇",
                "寶", "可", "智", "逸", "健", "筆", "七", "裕", "侃", "福", "嵐", "夕",
                "博", "榮", "哲", "佛", "阿", "皓", "輝", "淼", "琦", "朗", "昂", "月",
                "嚕", "賽", "紅", "餃", "岸", "拉", "斐", "保", "濛", "雅", "志", "浩",
                "子", "梓", "詩", "宥", "承", "品", "宸", "柏", "詠", "羽", "禹", "芯", "思",
            ]),
            addresses: strings(&[
                "台北市信義區", "台北市大安區", "台北市中山區", "台北市松山區",
                "新北市板橋區", "新北市新莊區", "新北市中和區", "新北市永和區",
                "桃園市桃園區", "桃園市中壢區", "台中市西屯區", "台中市北屯區",
                "台南市東區", "台南市北區", "高雄市左營區", "高雄市三民區",
            ]),
            email_domains: strings(&["gmail.com", "yahoo.com.tw", "hotmail.com", "outlook.com"]),
            allergies: strings(&[
                "Pollen",
                "Dust mites",
                "Seafood",
                "Nuts",
                "Milk",
                "Eggs",
                "Soy",
                "Wheat",
                "Drug allergy",
                "Animal dander",
                "Chemicals",
                "No known allergies",
            ]),
            chronic_diseases: strings(&[
                "Hypertension",
                "Diabetes",
                "Hyperlipidemia",
                "Heart disease",
                "Asthma",
                "Arthritis",
                "Thyroid disease",
                "Kidney disease",
                "Liver disease",
                "No chronic disease",
            ]),
            medications: strings(&[
                "Antihypertensive",
                "Antidiabetic",
                "Lipid-lowering agent",
                "Cardiac medication",
                "Asthma inhaler",
                "Painkiller",
                "Vitamins",
                "Calcium supplement",
                "Fish oil",
                "No medication",
            ]),
            surgeries: strings(&[
                "Appendectomy",
                "Cholecystectomy",
                "Cataract surgery",
                "Fracture surgery",
                "Heart surgery",
                "Tumor resection",
                "Hernia repair",
                "No surgical history",
            ]),
            family_history: strings(&[
                "Hypertension",
                "Diabetes",
                "Heart disease",
                "Cancer",
                "Stroke",
                "Kidney disease",
                "Mental illness",
                "Hereditary disease",
                "No family history",
            ]),
        }
    }
}

impl Default for ValuePools {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pools_are_populated() {
        let pools = ValuePools::new();

        assert_eq!(pools.surnames.len(), 72);
        assert_eq!(pools.given_names.len(), 121);
        assert_eq!(pools.addresses.len(), 16);
        assert_eq!(pools.email_domains.len(), 4);
        assert_eq!(pools.allergies.len(), 12);
        assert_eq!(pools.chronic_diseases.len(), 10);
        assert_eq!(pools.medications.len(), 10);
        assert_eq!(pools.surgeries.len(), 8);
        assert_eq!(pools.family_history.len(), 9);
    }

    #[test]
    fn test_subset_maxima_fit_pools() {
        let pools = ValuePools::new();

        assert!(MAX_ALLERGIES <= pools.allergies.len());
        assert!(MAX_CHRONIC_DISEASES <= pools.chronic_diseases.len());
        assert!(MAX_MEDICATIONS <= pools.medications.len());
        assert!(MAX_SURGERIES <= pools.surgeries.len());
        assert!(MAX_FAMILY_HISTORY <= pools.family_history.len());
    }
}
