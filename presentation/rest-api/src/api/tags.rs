use poem_openapi::Tags;

#[derive(Debug, Tags)]
pub enum ApiTags {
    Health,
    /// Franchises, their branches and branch products
    Franchises,
    /// Storage circuit breaker state and metrics
    Monitoring,
}
