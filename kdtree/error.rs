use thiserror::Error;

/// KD-tree 操作错误
///
/// 所有参数校验失败都归为同一种错误，校验总是先于任何修改进行，
/// 因此返回错误时树的状态保持不变。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KdTreeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl KdTreeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        KdTreeError::InvalidArgument(message.into())
    }
}
