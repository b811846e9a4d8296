//! 配额分配
//!
//! 把请求的题目总数拆成"选择题 / 判断题"两类总目标，再分摊到每个分块。

use crate::models::{QuestionCount, QuestionQuota};

/// Max 模式下每类题目的默认上限
pub const DEFAULT_UNBOUNDED_CEILING: QuestionQuota = QuestionQuota { mcq: 10, tf: 10 };

/// 配额分配结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPlan {
    /// 每个分块向后端请求的数量
    pub per_chunk: QuestionQuota,
    /// 合并后允许保留的总数量
    pub overall: QuestionQuota,
}

/// 计算配额
///
/// - `Unbounded`：总目标为 `ceiling`，每个分块同样请求 `ceiling`，不做除法
/// - `Concrete(n)`：选择题 `ceil(n/2)`，判断题 `floor(n/2)`；
///   多个分块时每块向上取整 `ceil(total/k)`，合并后的多余部分由聚合器截掉
///
/// `chunk_count` 至少为 1（调用方保证）
pub fn allocate(requested: QuestionCount, chunk_count: usize, ceiling: QuestionQuota) -> QuotaPlan {
    debug_assert!(chunk_count >= 1, "chunk_count 至少为 1");

    match requested {
        QuestionCount::Unbounded => QuotaPlan {
            per_chunk: ceiling,
            overall: ceiling,
        },
        QuestionCount::Concrete(n) => {
            let n = n as usize;
            let overall = QuestionQuota::new(n.div_ceil(2), n / 2);

            let per_chunk = if chunk_count <= 1 {
                overall
            } else {
                QuestionQuota::new(
                    overall.mcq.div_ceil(chunk_count),
                    overall.tf.div_ceil(chunk_count),
                )
            };

            QuotaPlan { per_chunk, overall }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concrete(n: u32) -> QuestionCount {
        QuestionCount::Concrete(n)
    }

    #[test]
    fn test_odd_total_gives_mcq_the_remainder() {
        let plan = allocate(concrete(11), 1, DEFAULT_UNBOUNDED_CEILING);
        assert_eq!(plan.overall, QuestionQuota::new(6, 5));
        assert_eq!(plan.per_chunk, plan.overall);
    }

    #[test]
    fn test_even_total_splits_evenly() {
        let plan = allocate(concrete(10), 1, DEFAULT_UNBOUNDED_CEILING);
        assert_eq!(plan.overall, QuestionQuota::new(5, 5));
        assert_eq!(plan.per_chunk, QuestionQuota::new(5, 5));
    }

    #[test]
    fn test_unbounded_is_not_divided() {
        let plan = allocate(QuestionCount::Unbounded, 3, DEFAULT_UNBOUNDED_CEILING);
        assert_eq!(plan.overall, QuestionQuota::new(10, 10));
        assert_eq!(plan.per_chunk, QuestionQuota::new(10, 10));
    }

    #[test]
    fn test_multi_chunk_rounds_up() {
        let plan = allocate(concrete(10), 3, DEFAULT_UNBOUNDED_CEILING);
        assert_eq!(plan.overall, QuestionQuota::new(5, 5));
        assert_eq!(plan.per_chunk, QuestionQuota::new(2, 2));

        let plan = allocate(concrete(1), 4, DEFAULT_UNBOUNDED_CEILING);
        assert_eq!(plan.overall, QuestionQuota::new(1, 0));
        assert_eq!(plan.per_chunk, QuestionQuota::new(1, 0));
    }

    #[test]
    fn test_custom_ceiling() {
        let ceiling = QuestionQuota::new(4, 6);
        let plan = allocate(QuestionCount::Unbounded, 1, ceiling);
        assert_eq!(plan.overall, ceiling);
        assert_eq!(plan.per_chunk, ceiling);
    }

    #[test]
    fn test_zero_total() {
        let plan = allocate(concrete(0), 2, DEFAULT_UNBOUNDED_CEILING);
        assert_eq!(plan.overall, QuestionQuota::default());
        assert_eq!(plan.per_chunk, QuestionQuota::default());
    }
}
