//! Shared request parsing helpers for HTTP handlers.

use pagination::{DEFAULT_PAGE_SIZE, PageRequest};

use crate::domain::Error;

/// Build a validated page selection from optional query parameters.
///
/// Pages default to the first page with the default size; out-of-range
/// values surface as validation failures.
pub fn page_request(page: Option<u32>, page_size: Option<u32>) -> Result<PageRequest, Error> {
    PageRequest::new(page.unwrap_or(1), page_size.unwrap_or(DEFAULT_PAGE_SIZE))
        .map_err(|err| Error::invalid_request(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_parameters_are_absent() {
        let request = page_request(None, None).expect("defaults validate");
        assert_eq!(request.page(), 1);
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn out_of_range_values_become_validation_failures() {
        let error = page_request(Some(0), None).expect_err("page zero rejected");
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
        let error = page_request(None, Some(0)).expect_err("size zero rejected");
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
    }
}
