use serde::{Deserialize, Serialize};

/// 目标岗位（题目归属的评估分类）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetRole(String);

impl TargetRole {
    /// 从用户输入创建；空白字符串返回 None
    pub fn new(role: impl AsRef<str>) -> Option<Self> {
        let trimmed = role.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TargetRole {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value).ok_or_else(|| "target role must not be blank".to_string())
    }
}

impl From<TargetRole> for String {
    fn from(role: TargetRole) -> Self {
        role.0
    }
}

impl std::fmt::Display for TargetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
