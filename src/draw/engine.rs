//! 单轮抽取算法。
//!
//! 规则：
//! 1. 先收内定（按规则登记顺序，同一参与者只收一次，不在候选池的跳过）；
//! 2. 内定超出名额时按登记顺序截断，不再随机补位；
//! 3. 否则从「候选池 − 内定」中均匀洗牌取前缀补足；
//! 4. 候选不足时允许少发，永不报错。

use rand::Rng;
use rand::seq::SliceRandom;
use uuid::Uuid;

use crate::models::{Participant, RiggedRule};

/// 单轮抽取人数硬上限
pub const MAX_DRAW_PER_ROUND: usize = 10;

/// 一轮抽取的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawSelection {
    /// 中选名单：内定在前（登记顺序），随机在后（洗牌顺序）
    pub winners: Vec<Participant>,
    /// 因名额不足被截断的内定人数，调用方据此告警
    pub dropped_forced: usize,
}

impl DrawSelection {
    fn empty() -> Self {
        Self {
            winners: Vec::new(),
            dropped_forced: 0,
        }
    }
}

/// 计算某奖品一轮的中奖名单。纯函数：同样的输入加同样的随机源
/// 产生同样的输出，不读写任何外部状态。
///
/// - `requested_slots`: 调用方给出的本轮名额（通常是 min(剩余名额, 10)），
///   内部再按硬上限钳制一次
/// - `eligible_pool`: 未中过任何奖的参与者，由调用方过滤
/// - `rules`: 全部内定规则，引擎自行筛选属于该奖品的子集
pub fn select_winners<R: Rng>(
    prize_id: Uuid,
    requested_slots: usize,
    eligible_pool: &[Participant],
    rules: &[RiggedRule],
    rng: &mut R,
) -> DrawSelection {
    let slots = requested_slots.min(MAX_DRAW_PER_ROUND);
    if slots == 0 || eligible_pool.is_empty() {
        return DrawSelection::empty();
    }

    // 内定名单：登记顺序遍历，先查重再收录，首条命中生效
    let mut forced: Vec<Participant> = Vec::new();
    for rule in rules.iter().filter(|r| r.prize_id == prize_id) {
        if forced.iter().any(|p| p.id == rule.participant_id) {
            continue;
        }
        if let Some(user) = eligible_pool.iter().find(|p| p.id == rule.participant_id) {
            forced.push(user.clone());
        }
    }

    if forced.len() > slots {
        // 内定超额：截断即止，绝不随机补位
        let dropped_forced = forced.len() - slots;
        forced.truncate(slots);
        return DrawSelection {
            winners: forced,
            dropped_forced,
        };
    }

    let needed = slots - forced.len();
    let mut pool: Vec<Participant> = eligible_pool
        .iter()
        .filter(|p| !forced.iter().any(|f| f.id == p.id))
        .cloned()
        .collect();
    // 均匀洗牌后取前缀；不足 needed 时有多少取多少
    pool.shuffle(rng);
    pool.truncate(needed);

    let mut winners = forced;
    winners.append(&mut pool);
    DrawSelection {
        winners,
        dropped_forced: 0,
    }
}
