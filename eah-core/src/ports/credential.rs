/// The key the bearer token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Persistent key-value storage for credentials.
pub trait CredentialStore {
    /// Storage failure
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Remove `key`.
    ///
    /// # Returns
    ///
    /// Ok(true) if a value was removed, Ok(false) if there was none.
    fn remove(&self, key: &str) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
