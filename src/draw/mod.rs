//! 抽奖核心：纯引擎与轮次状态机。
//!
//! 这一层不依赖 actix、存储或系统时钟，所有输入（候选池、规则、
//! 随机源、时间戳）都由调用方注入，保证可以用固定种子做确定性测试。

pub mod engine;
pub mod round;

pub use engine::{DrawSelection, MAX_DRAW_PER_ROUND, select_winners};
pub use round::{RoundController, RoundError, RoundPhase};
