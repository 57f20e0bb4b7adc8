//! 通用类型定义：边权重与最短路径距离

use bigdecimal::{BigDecimal, One, Zero};
use std::fmt;

/// 边权重（十进制，零值表示"无权重"）
pub type Weight = BigDecimal;

/// 无权重边使用的零值
pub fn zero_weight() -> Weight {
    BigDecimal::zero()
}

/// 无权重边在最短路径计算中的默认权重
pub fn unit_weight() -> Weight {
    BigDecimal::one()
}

/// 权重是否为负
pub fn is_negative(weight: &Weight) -> bool {
    *weight < BigDecimal::zero()
}

/// 暂定距离
///
/// `Finite` 排在 `Infinite` 之前，因此可直接用于比较与优先队列。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Finite(Weight),
    Infinite,
}

impl Distance {
    pub fn zero() -> Self {
        Distance::Finite(zero_weight())
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    /// 沿一条边延伸，无穷大加任何权重仍为无穷大
    pub fn extend(&self, weight: &Weight) -> Distance {
        match self {
            Distance::Finite(d) => Distance::Finite(d + weight),
            Distance::Infinite => Distance::Infinite,
        }
    }

    /// 两段距离之和
    pub fn sum(&self, other: &Distance) -> Distance {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => Distance::Finite(a + b),
            _ => Distance::Infinite,
        }
    }

    pub fn as_weight(&self) -> Option<&Weight> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }

    pub fn into_weight(self) -> Option<Weight> {
        match self {
            Distance::Finite(d) => Some(d),
            Distance::Infinite => None,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(d) => write!(f, "{}", d),
            Distance::Infinite => write!(f, "∞"),
        }
    }
}
