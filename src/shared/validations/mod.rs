use crate::shared::PaginationParams;

pub fn validate_pagination(page: Option<u32>, limit: Option<u32>) -> PaginationParams {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    PaginationParams { page, limit }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_page_and_limit() {
        let p = validate_pagination(Some(0), Some(1000));
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 100);

        let p = validate_pagination(None, None);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 20);
    }
}
