use crate::models::{ApplicationError, AuctionPage, AuctionQuery};

/// Read access to the auction listings.
pub trait AuctionRepository: super::Backend {
    /// Fetch one page of auction records matching the query's filters.
    ///
    /// # Returns
    ///
    /// - Ok(Ok(page)) if the backend answered with a success envelope
    /// - Ok(Err(application_error)) if the envelope carried a non-success status
    /// - Err(error) if the request itself failed
    fn search_auctions(
        &self,
        query: &AuctionQuery,
    ) -> impl Future<Output = Result<Result<AuctionPage, ApplicationError>, Self::Error>> + Send;
}
