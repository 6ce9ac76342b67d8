//! 商品与菜谱本地模型定义

use serde::{Deserialize, Serialize};

/// 商品分类（与后端 Category 枚举对应）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "BROT")]
    Brot,
    #[serde(rename = "SALAMI")]
    Salami,
    #[serde(rename = "KAESE")]
    Kaese,
}

impl Category {
    /// 请求参数里使用的枚举值
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Brot => "BROT",
            Category::Salami => "SALAMI",
            Category::Kaese => "KAESE",
        }
    }

    /// UI 显示名称
    pub fn label(&self) -> &'static str {
        match self {
            Category::Brot => "Brot",
            Category::Salami => "Salami",
            Category::Kaese => "Käse",
        }
    }
}

/// 菜谱（挂在商品下）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "productId", default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "pdfUrl", default)]
    pub pdf_url: Option<String>,
}

impl Recipe {
    /// 是否带 PDF 附件
    pub fn has_pdf(&self) -> bool {
        self.pdf_url.as_deref().map(|u| !u.is_empty()).unwrap_or(false)
    }
}

/// 商品
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub price: f64,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    #[serde(rename = "imageUrlDetails", default)]
    pub image_url_details: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_parses_backend_json() {
        let json = r#"{
            "id": 3,
            "title": "Pane Casellese",
            "description": "Traditionelles Brot",
            "category": "BROT",
            "price": 4.5,
            "imageUrl": "https://example.com/pane.webp",
            "imageUrlDetails": "https://example.com/pane_detail.webp",
            "ingredients": "Mehl, Wasser, Salz",
            "recipes": [{"id": 9, "productId": 3, "title": "Bruschetta", "text": "…", "pdfUrl": null}]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, Some(3));
        assert_eq!(product.category, Some(Category::Brot));
        assert_eq!(product.recipes.len(), 1);
        assert!(!product.recipes[0].has_pdf());
    }

    #[test]
    fn product_tolerates_missing_optional_fields() {
        let product: Product = serde_json::from_str(r#"{"title":"Salame"}"#).unwrap();
        assert_eq!(product.id, None);
        assert_eq!(product.category, None);
        assert!(product.recipes.is_empty());
    }

    #[test]
    fn recipe_has_pdf_requires_nonempty_url() {
        let with_pdf: Recipe =
            serde_json::from_str(r#"{"title":"x","pdfUrl":"https://example.com/a.pdf"}"#).unwrap();
        assert!(with_pdf.has_pdf());

        let empty_pdf: Recipe = serde_json::from_str(r#"{"title":"x","pdfUrl":""}"#).unwrap();
        assert!(!empty_pdf.has_pdf());
    }

    #[test]
    fn category_labels_match_enum_values() {
        assert_eq!(Category::Kaese.as_str(), "KAESE");
        assert_eq!(Category::Kaese.label(), "Käse");
        let parsed: Category = serde_json::from_str(r#""SALAMI""#).unwrap();
        assert_eq!(parsed, Category::Salami);
    }
}
