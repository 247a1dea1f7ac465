//! Food category table
//!
//! The public nutrition API groups dishes by a two-digit `foodLv3Cd` code.

use serde::Serialize;

/// A catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoodCategory {
    pub code: &'static str,
    pub name: &'static str,
}

const fn category(code: &'static str, name: &'static str) -> FoodCategory {
    FoodCategory { code, name }
}

/// All categories offered for search, in display order.
///
/// Codes 21-23 and 26 are not served by the API and are absent on purpose.
pub const CATEGORIES: [FoodCategory; 23] = [
    category("01", "밥류"),
    category("02", "빵 및 과자류"),
    category("03", "면 및 만두류"),
    category("04", "죽 및 스프류"),
    category("05", "국 및 탕류"),
    category("06", "찌개 및 전골류"),
    category("07", "찜류"),
    category("08", "구이류"),
    category("09", "전적 및 부침류"),
    category("10", "볶음류"),
    category("11", "조림류"),
    category("12", "튀김류"),
    category("13", "나물숙채류"),
    category("14", "생채무침류"),
    category("15", "김치류"),
    category("16", "젓갈류"),
    category("17", "장아찌 절임류"),
    category("18", "소스류"),
    category("19", "유제품 및 빙과류"),
    category("20", "음료 및 차류"),
    category("24", "곡류 서류 제품"),
    category("25", "두류 견과 및 종실류"),
    category("27", "수조어육류"),
];

/// Category selected when nothing else was chosen
pub const DEFAULT_CATEGORY: &str = "01";

/// Look up a category by code
pub fn find(code: &str) -> Option<&'static FoodCategory> {
    let code = code.trim();
    CATEGORIES.iter().find(|c| c.code == code)
}

/// Display name for a category code
pub fn category_name(code: &str) -> Option<&'static str> {
    find(code).map(|c| c.name)
}
