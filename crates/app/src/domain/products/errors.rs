//! Products service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ProductsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_objects_map_to_not_found() {
        let error = ProductsServiceError::from(StoreError::NotFound);

        assert!(matches!(error, ProductsServiceError::NotFound));
    }

    #[test]
    fn other_store_errors_are_wrapped() {
        let error = ProductsServiceError::from(StoreError::Unavailable("down".to_string()));

        assert!(matches!(
            error,
            ProductsServiceError::Store(StoreError::Unavailable(_))
        ));
    }
}
