use serde::{Deserialize, Serialize};

/// Конверт постраничной выдачи сервера.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

impl<T> Page<T> {
    /// Одна страница, в которую уложен весь список.
    pub fn single(content: Vec<T>) -> Self {
        let len = content.len();
        Page {
            content,
            total_pages: 1,
            total_elements: len as u64,
            number: 0,
            size: len as u32,
        }
    }

    pub fn is_last(&self) -> bool {
        self.number.saturating_add(1) >= self.total_pages
    }
}

/// Количество страниц при известном общем числе элементов.
pub fn page_count(total_elements: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_elements.div_ceil(page_size as u64) as u32
}
