//! 导入行上下文
//!
//! 封装"我正在提交哪个岗位的第几行"这一信息

use std::fmt::Display;

use crate::models::TargetRole;

/// 导入行上下文
#[derive(Debug, Clone)]
pub struct RowCtx {
    /// 源数据行号（从1开始）
    pub row: usize,

    /// 本批次中的序号（从1开始，仅用于日志显示）
    pub position: usize,

    /// 本批次总数
    pub total: usize,

    /// 目标岗位
    pub role: TargetRole,
}

impl RowCtx {
    /// 创建新的行上下文
    pub fn new(row: usize, position: usize, total: usize, role: TargetRole) -> Self {
        Self {
            row,
            position,
            total,
            role,
        }
    }
}

impl Display for RowCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[第 {} 行 {}/{} 岗位#{}]",
            self.row, self.position, self.total, self.role
        )
    }
}
