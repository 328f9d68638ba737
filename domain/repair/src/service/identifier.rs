/// Source of public identifiers. Uniqueness is checked by the caller.
pub trait IdentifierService: Send + Sync {
    /// Six digit number in `100000..=999999`.
    fn request_number(&self) -> String;

    /// 32 lowercase hex characters carrying 128 random bits.
    fn tracking_token(&self) -> String;
}
