//! 考评清单（チェックリストカタログ）モジュール
//!
//! 分类 → 考评项 → 満点 の固定テーブルを管理する。
//! 考评開始時に一度だけ読み込み、以後は読み取り専用の入力データとして扱う。
//! 組み込みカタログのほか、JSON / CSV から読み込める。

use crate::error::{Error, Result};
use crate::types::{ChecklistItem, Judgment};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// 1考评项あたりの満点上限
pub const MAX_ITEM_SCORE: u32 = 1000;

/// カタログ上の考评项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    #[serde(default, alias = "desc")]
    pub description: String,
    pub max_score: u32,
}

/// 分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub id: String,
    pub name: String,
    pub items: Vec<CatalogItem>,
}

/// 考评清单全体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistCatalog {
    categories: Vec<CatalogCategory>,
}

impl ChecklistCatalog {
    /// 分类リストから構築（検証あり）
    pub fn new(categories: Vec<CatalogCategory>) -> Result<Self> {
        let catalog = Self { categories };
        catalog.validate()?;
        Ok(catalog)
    }

    /// 組み込みの標準清单（环境卫生 / 安全检查 / 服务礼仪、満点合計60）
    pub fn builtin() -> Self {
        fn item(id: &str, title: &str, description: &str, max_score: u32) -> CatalogItem {
            CatalogItem {
                id: id.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                max_score,
            }
        }

        Self {
            categories: vec![
                CatalogCategory {
                    id: "env".to_string(),
                    name: "环境卫生".to_string(),
                    items: vec![
                        item("env_1", "地面清洁", "地面无垃圾、无积水、无油污。", 10),
                        item("env_2", "玻璃门窗", "无灰尘指纹，亮丽洁净。", 5),
                    ],
                },
                CatalogCategory {
                    id: "sec".to_string(),
                    name: "安全检查".to_string(),
                    items: vec![
                        item("sec_1", "消防设施", "灭火器在有效期内，通道无堆物。", 20),
                        item("sec_2", "用电安全", "插座不超负荷，无裸露线缆。", 15),
                    ],
                },
                CatalogCategory {
                    id: "svc".to_string(),
                    name: "服务礼仪".to_string(),
                    items: vec![item("svc_1", "着装规范", "统一工服，佩戴工号牌。", 10)],
                },
            ],
        }
    }

    /// JSONファイルから読み込み
    pub fn from_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// `{"categories": [...]}` 形式と、分类配列のみの形式の両方を受け付ける。
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let categories: Vec<CatalogCategory> = match value {
            serde_json::Value::Array(_) => serde_json::from_value(value)?,
            _ => serde_json::from_value::<ChecklistCatalog>(value)?.categories,
        };
        Self::new(categories)
    }

    /// CSVファイルから読み込み
    pub fn from_csv(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_csv_str(&content)
    }

    /// CSV文字列から読み込み
    ///
    /// 列: 分类ID, 分类名, 考评项ID, 标题, 考评标准, 满分（1行目はヘッダー）
    pub fn from_csv_str(content: &str) -> Result<Self> {
        let mut categories: Vec<CatalogCategory> = Vec::new();

        // ヘッダーをスキップ
        for (line_no, line) in content.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }

            let fields = parse_csv_line(line);
            if fields.len() < 6 {
                return Err(Error::InvalidCatalog(format!(
                    "第{}行: 列数不足 ({}列)",
                    line_no + 1,
                    fields.len()
                )));
            }

            let max_score: u32 = fields[5].parse().map_err(|_| {
                Error::InvalidCatalog(format!("第{}行: 满分不是整数: {}", line_no + 1, fields[5]))
            })?;

            let item = CatalogItem {
                id: fields[2].to_string(),
                title: fields[3].to_string(),
                description: fields[4].to_string(),
                max_score,
            };

            match categories.iter_mut().find(|c| c.id == fields[0]) {
                Some(category) => category.items.push(item),
                None => categories.push(CatalogCategory {
                    id: fields[0].to_string(),
                    name: fields[1].to_string(),
                    items: vec![item],
                }),
            }
        }

        Self::new(categories)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for item in self.categories.iter().flat_map(|c| c.items.iter()) {
            check_item_definition(&item.id, item.max_score, &mut seen)
                .map_err(Error::InvalidCatalog)?;
        }
        Ok(())
    }

    pub fn categories(&self) -> &[CatalogCategory] {
        &self.categories
    }

    /// 考评项の総数
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// 満点合計
    pub fn max_total(&self) -> u32 {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .fold(0u32, |acc, item| acc.saturating_add(item.max_score))
    }

    /// 新しい考评用の考评项リストを生成（全項目 合格・満点 で初期化）
    pub fn instantiate(&self) -> Vec<ChecklistItem> {
        self.categories
            .iter()
            .flat_map(|category| {
                category.items.iter().map(move |item| ChecklistItem {
                    id: item.id.clone(),
                    category: category.name.clone(),
                    title: item.title.clone(),
                    description: item.description.clone(),
                    score: item.max_score,
                    max_score: item.max_score,
                    judgment: Judgment::Pass,
                    comment: String::new(),
                })
            })
            .collect()
    }
}

impl Default for ChecklistCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// 考评项IDと満点の妥当性チェック（清单・草稿で共通）
///
/// IDは空不可・重複不可、満点は 1..=MAX_ITEM_SCORE。
pub(crate) fn check_item_definition<'a>(
    id: &'a str,
    max_score: u32,
    seen: &mut HashSet<&'a str>,
) -> std::result::Result<(), String> {
    if id.trim().is_empty() {
        return Err("考评项ID为空".into());
    }
    if !seen.insert(id) {
        return Err(format!("考评项ID重复: {}", id));
    }
    if max_score == 0 {
        return Err(format!("满分必须大于0: {}", id));
    }
    if max_score > MAX_ITEM_SCORE {
        return Err(format!("满分超过上限 {}: {} = {}", MAX_ITEM_SCORE, id, max_score));
    }
    Ok(())
}

fn parse_csv_line(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut field_start = 0;

    for (i, c) in line.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == ',' && !in_quotes {
            fields.push(trim_quotes(&line[field_start..i]));
            field_start = i + c.len_utf8();
        }
    }

    // 最後のフィールド
    fields.push(trim_quotes(&line[field_start..]));
    fields
}

fn trim_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
