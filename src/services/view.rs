/// Receives the refresh signal emitted after a lead has been delivered.
pub trait ViewInvalidator: Send + Sync + std::fmt::Debug {
    /// Drops any cached representation of the page served at `path`.
    fn invalidate(&self, path: &str);
}
