//! 参数类型系统
//!
//! 四种参数类型与转换矩阵：
//!
//! | 实参 \ 形参 | int | float | string | bool |
//! |-------------|-----|-------|--------|------|
//! | int         | ✓   | ✓     |        | ✓ (非零) |
//! | float       |     | ✓     |        |      |
//! | string      |     |       | ✓      |      |
//! | bool        | ✓   |       |        | ✓    |

use std::fmt;

/// 参数类型，声明顺序与 C 侧枚举值一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArgType {
    Int,
    Float,
    Str,
    Bool,
}

impl ArgType {
    pub const ALL: [ArgType; 4] = [ArgType::Int, ArgType::Float, ArgType::Str, ArgType::Bool];

    /// 诊断中显示的名字
    pub fn name(&self) -> &'static str {
        match self {
            ArgType::Int => "int",
            ArgType::Float => "float",
            ArgType::Str => "string",
            ArgType::Bool => "bool",
        }
    }

    /// C 侧枚举值
    pub fn c_tag(&self) -> i32 {
        match self {
            ArgType::Int => 0,
            ArgType::Float => 1,
            ArgType::Str => 2,
            ArgType::Bool => 3,
        }
    }

    pub fn from_c_tag(tag: i32) -> Option<Self> {
        ArgType::ALL.into_iter().find(|ty| ty.c_tag() == tag)
    }

    /// 胶水代码中的签名常量
    pub fn glue_constant(&self) -> &'static str {
        match self {
            ArgType::Int => "ARG_INT",
            ArgType::Float => "ARG_FLT",
            ArgType::Str => "ARG_STR",
            ArgType::Bool => "ARG_BOOL",
        }
    }

    /// 胶水代码中的参数访问宏
    pub fn accessor(&self) -> &'static str {
        match self {
            ArgType::Int => "LINAL_arg_int",
            ArgType::Float => "LINAL_arg_flt",
            ArgType::Str => "LINAL_arg_str",
            ArgType::Bool => "LINAL_arg_bool",
        }
    }

    /// 胶水代码中局部变量的 C 类型
    pub fn c_type(&self) -> &'static str {
        match self {
            ArgType::Int => "int",
            ArgType::Float => "float",
            ArgType::Str => "char *",
            ArgType::Bool => "bool",
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 参数值
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Int(i32),
    Float(f32),
    Str(String),
    Bool(bool),
}

impl ArgValue {
    pub fn ty(&self) -> ArgType {
        match self {
            ArgValue::Int(_) => ArgType::Int,
            ArgValue::Float(_) => ArgType::Float,
            ArgValue::Str(_) => ArgType::Str,
            ArgValue::Bool(_) => ArgType::Bool,
        }
    }

    /// 按转换矩阵转换为 `target`，不允许时返回 `None`
    pub fn coerce(&self, target: ArgType) -> Option<ArgValue> {
        match (self, target) {
            (ArgValue::Int(i), ArgType::Int) => Some(ArgValue::Int(*i)),
            (ArgValue::Bool(b), ArgType::Int) => Some(ArgValue::Int(i32::from(*b))),
            (ArgValue::Float(f), ArgType::Float) => Some(ArgValue::Float(*f)),
            (ArgValue::Int(i), ArgType::Float) => Some(ArgValue::Float(*i as f32)),
            (ArgValue::Str(s), ArgType::Str) => Some(ArgValue::Str(s.clone())),
            (ArgValue::Bool(b), ArgType::Bool) => Some(ArgValue::Bool(*b)),
            (ArgValue::Int(i), ArgType::Bool) => Some(ArgValue::Bool(*i != 0)),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            ArgValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            ArgValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Int(i) => write!(f, "{i}"),
            ArgValue::Float(x) => write!(f, "{x}"),
            ArgValue::Str(s) => write!(f, "{s:?}"),
            ArgValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// 类型层面的转换矩阵
pub fn can_coerce(from: ArgType, to: ArgType) -> bool {
    matches!(
        (from, to),
        (ArgType::Int, ArgType::Int)
            | (ArgType::Bool, ArgType::Int)
            | (ArgType::Float, ArgType::Float)
            | (ArgType::Int, ArgType::Float)
            | (ArgType::Str, ArgType::Str)
            | (ArgType::Bool, ArgType::Bool)
            | (ArgType::Int, ArgType::Bool)
    )
}

/// 英文序数后缀：1st 2nd 3rd 4th ... 11th 12th 13th ... 21st
pub fn ordinal_suffix(n: usize) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(ty: ArgType) -> ArgValue {
        match ty {
            ArgType::Int => ArgValue::Int(7),
            ArgType::Float => ArgValue::Float(1.5),
            ArgType::Str => ArgValue::Str("s".into()),
            ArgType::Bool => ArgValue::Bool(true),
        }
    }

    #[test]
    fn test_coercion_matrix_matches_value_coercion() {
        for from in ArgType::ALL {
            for to in ArgType::ALL {
                let coerced = sample(from).coerce(to);
                assert_eq!(coerced.is_some(), can_coerce(from, to), "{from} -> {to}");
                if let Some(v) = coerced {
                    assert_eq!(v.ty(), to);
                }
            }
        }
    }

    #[test]
    fn test_allowed_pairs_exactly() {
        let allowed: Vec<_> = ArgType::ALL
            .iter()
            .flat_map(|&f| ArgType::ALL.iter().map(move |&t| (f, t)))
            .filter(|&(f, t)| can_coerce(f, t))
            .collect();
        assert_eq!(allowed.len(), 7);
        assert!(!can_coerce(ArgType::Float, ArgType::Int));
        assert!(!can_coerce(ArgType::Str, ArgType::Bool));
        assert!(!can_coerce(ArgType::Bool, ArgType::Float));
    }

    #[test]
    fn test_coerced_values() {
        assert_eq!(ArgValue::Bool(true).coerce(ArgType::Int), Some(ArgValue::Int(1)));
        assert_eq!(ArgValue::Bool(false).coerce(ArgType::Int), Some(ArgValue::Int(0)));
        assert_eq!(ArgValue::Int(3).coerce(ArgType::Float), Some(ArgValue::Float(3.0)));
        assert_eq!(ArgValue::Int(0).coerce(ArgType::Bool), Some(ArgValue::Bool(false)));
        assert_eq!(ArgValue::Int(-2).coerce(ArgType::Bool), Some(ArgValue::Bool(true)));
        assert_eq!(ArgValue::Float(3.5).coerce(ArgType::Int), None);
    }

    #[test]
    fn test_c_tags_round_trip() {
        for ty in ArgType::ALL {
            assert_eq!(ArgType::from_c_tag(ty.c_tag()), Some(ty));
        }
        assert_eq!(ArgType::from_c_tag(4), None);
        assert_eq!(ArgType::from_c_tag(-1), None);
    }

    #[test]
    fn test_ordinal_suffix() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (9, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (101, "st"),
            (111, "th"),
        ];
        for (n, suffix) in cases {
            assert_eq!(ordinal_suffix(n), suffix, "{n}");
        }
    }
}
