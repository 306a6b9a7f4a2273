use serde::Serialize;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForm {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating_value: u8,
    #[validate(length(min = 1, max = 1000, message = "review must be 1-1000 characters"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        let ok = ReviewForm { rating_value: 5, content: "great".into() };
        assert!(ok.validate().is_ok());

        let zero = ReviewForm { rating_value: 0, content: "meh".into() };
        assert!(zero.validate().is_err());

        let empty = ReviewForm { rating_value: 3, content: String::new() };
        assert!(empty.validate().is_err());
    }
}
