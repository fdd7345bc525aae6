use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Item 的 id 在來源資料中可能是數字也可能是字串，保留原始型態以便原樣輸出
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(serde_json::Number),
    Text(String),
}

impl ItemId {
    /// 排序用的數值形式，非數字也非數字字串時一律視為 0
    pub fn as_i64(&self) -> i64 {
        match self {
            ItemId::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|v| v.min(i64::MAX as u64) as i64))
                .or_else(|| n.as_f64().map(|v| v.trunc() as i64))
                .unwrap_or(0),
            ItemId::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| {
                        trimmed
                            .parse::<f64>()
                            .ok()
                            .filter(|v| v.is_finite())
                            .map(|v| v.trunc() as i64)
                    })
                    .unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// 單筆道具資料。已知欄位轉成具型別的欄位，其餘欄位 (含型別不符的已知欄位)
/// 原封不動保留在 `extra`，輸出時照樣帶回
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rare: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// 只有非 JSON 物件的資料會被丟棄
    pub fn from_value(value: Value) -> Option<Item> {
        match value {
            Value::Object(map) => Some(Item::from_map(map)),
            _ => None,
        }
    }

    /// 型別正確的已知欄位才會從 map 取出，型別不符的留在 `extra`
    pub fn from_map(mut map: Map<String, Value>) -> Item {
        let id = take_field(&mut map, "id", |v| match v {
            Value::Number(n) => Some(ItemId::Number(n.clone())),
            Value::String(s) => Some(ItemId::Text(s.clone())),
            _ => None,
        });

        Item {
            id,
            name_text: take_field(&mut map, "name_text", as_text),
            icon: take_field(&mut map, "icon", as_text),
            rare: take_field(&mut map, "rare", as_text),
            item_type: take_field(&mut map, "type", as_text),
            collection_type: take_field(&mut map, "collection_type", as_text),
            extra: map,
        }
    }

    pub fn id_number(&self) -> i64 {
        self.id.as_ref().map(ItemId::as_i64).unwrap_or(0)
    }

    pub fn id_string(&self) -> String {
        self.id.as_ref().map(ItemId::to_string).unwrap_or_default()
    }

    pub fn name_lower(&self) -> String {
        self.name_text.as_deref().unwrap_or("").to_lowercase()
    }

    pub fn icon_lower(&self) -> String {
        self.icon.as_deref().unwrap_or("").to_lowercase()
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Item::from_map)
    }
}

fn as_text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

fn take_field<T>(
    map: &mut Map<String, Value>,
    key: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let converted = map.get(key).and_then(convert)?;
    map.remove(key);
    Some(converted)
}

/// 單次抓取得到的完整資料集
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub items: Vec<Item>,
    /// 轉換時被丟棄的非物件資料筆數
    pub skipped: usize,
}

impl Catalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, skipped: 0 }
    }

    pub fn from_values(values: Vec<Value>) -> Self {
        let total = values.len();
        let items: Vec<Item> = values.into_iter().filter_map(Item::from_value).collect();
        let skipped = total - items.len();
        Self { items, skipped }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Item> {
        self.items
            .iter()
            .find(|item| item.id.as_ref().is_some_and(|item_id| item_id.to_string() == id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rarity {
    OrangePlus,
    Orange,
    PurplePlus,
    Purple,
    Red,
    Blue,
    Green,
    White,
}

/// 缺少或無法辨識的稀有度排在最後
pub const UNKNOWN_RARITY_RANK: u8 = 9;

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::OrangePlus => "Orange_Plus",
            Rarity::Orange => "Orange",
            Rarity::PurplePlus => "Purple_Plus",
            Rarity::Purple => "Purple",
            Rarity::Red => "Red",
            Rarity::Blue => "Blue",
            Rarity::Green => "Green",
            Rarity::White => "White",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Rarity::OrangePlus => 1,
            Rarity::Orange => 2,
            Rarity::PurplePlus => 3,
            Rarity::Purple => 4,
            Rarity::Red => 5,
            Rarity::Blue => 6,
            Rarity::Green => 7,
            Rarity::White => 8,
        }
    }

    /// 背景圖檔名使用的標籤 (`Orange_Plus` -> `OrangePlus`)
    pub fn background_tag(&self) -> String {
        self.as_str().replace('_', "")
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Orange_Plus" => Ok(Rarity::OrangePlus),
            "Orange" => Ok(Rarity::Orange),
            "Purple_Plus" => Ok(Rarity::PurplePlus),
            "Purple" => Ok(Rarity::Purple),
            "Red" => Ok(Rarity::Red),
            "Blue" => Ok(Rarity::Blue),
            "Green" => Ok(Rarity::Green),
            "White" => Ok(Rarity::White),
            other => Err(format!("unknown rarity: {}", other)),
        }
    }
}

pub fn rarity_rank(rare: Option<&str>) -> u8 {
    rare.and_then(|r| r.parse::<Rarity>().ok())
        .map(|r| r.rank())
        .unwrap_or(UNKNOWN_RARITY_RANK)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Rarity,
}

impl SortKey {
    /// 無法辨識的值一律回到 id 排序
    pub fn parse(s: &str) -> SortKey {
        match s.trim() {
            "name" => SortKey::Name,
            "rarity" => SortKey::Rarity,
            _ => SortKey::Id,
        }
    }
}

pub const MATCH_ALL: &str = "all";
pub const COLLECTION_TYPE_TAG: &str = "COLLECTION";
pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PER_PAGE: usize = 50;

/// `/api/items/filter` 的原始查詢參數，每個欄位都是可有可無的文字
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterQuery {
    pub search: Option<String>,
    pub rarity: Option<String>,
    pub item_type: Option<String>,
    pub collection: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl FilterQuery {
    /// 寬鬆解析：忽略未知的 key，重複的 key 取第一個，不會失敗
    pub fn from_query_string(raw: Option<&str>) -> Self {
        let mut query = FilterQuery::default();

        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or("").as_bytes()) {
            let slot = match key.as_ref() {
                "search" => &mut query.search,
                "rarity" => &mut query.rarity,
                "type" => &mut query.item_type,
                "collection" => &mut query.collection,
                "sort" => &mut query.sort,
                "page" => &mut query.page,
                "per_page" => &mut query.per_page,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParameters {
    pub search: String,
    pub rarity: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub collection: String,
    pub sort: SortKey,
    pub page: usize,
    pub per_page: usize,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            search: String::new(),
            rarity: MATCH_ALL.to_string(),
            item_type: MATCH_ALL.to_string(),
            collection: MATCH_ALL.to_string(),
            sort: SortKey::Id,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

fn text_or_all(value: Option<String>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| MATCH_ALL.to_string())
}

/// 正整數，否則回傳預設值
pub fn positive_or(value: Option<&str>, fallback: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(fallback)
}

impl From<FilterQuery> for QueryParameters {
    fn from(raw: FilterQuery) -> Self {
        Self {
            search: raw.search.unwrap_or_default().to_lowercase(),
            rarity: text_or_all(raw.rarity),
            item_type: text_or_all(raw.item_type),
            collection: text_or_all(raw.collection),
            sort: raw.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
            page: positive_or(raw.page.as_deref(), DEFAULT_PAGE),
            per_page: positive_or(raw.per_page.as_deref(), DEFAULT_PER_PAGE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    pub items: Vec<Item>,
    pub pagination: Pagination,
    pub filters: QueryParameters,
}
