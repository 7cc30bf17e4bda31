/// Error taxonomy shared by the statistics engine, the synthesizer and the
/// view-state controller.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("render target unavailable: {0}")]
    RenderTargetUnavailable(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
