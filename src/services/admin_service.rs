use std::sync::Arc;

use crate::error::AppResult;
use crate::models::EventSnapshot;
use crate::store::EventStore;

#[derive(Clone)]
pub struct AdminService {
    store: Arc<EventStore>,
}

impl AdminService {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// 全量重置：参与者、奖品、规则、中奖记录与当前轮次在一次
    /// 写锁内一并清空，绝不部分清除。
    pub fn reset(&self) -> AppResult<()> {
        let mut state = self.store.write()?;
        state.reset();
        log::info!("Event state fully reset");
        Ok(())
    }

    /// 导出活动全量状态，交给外部适配器落盘
    pub fn snapshot(&self) -> AppResult<EventSnapshot> {
        let state = self.store.read()?;
        Ok(state.snapshot())
    }

    /// 从快照整体恢复四个集合；当前轮次作废回到 Idle
    pub fn restore(&self, snapshot: EventSnapshot) -> AppResult<()> {
        let mut state = self.store.write()?;
        log::info!(
            "Restoring event state: {} participants, {} prizes, {} rules, {} winners",
            snapshot.participants.len(),
            snapshot.prizes.len(),
            snapshot.rigged_rules.len(),
            snapshot.winners.len()
        );
        state.restore(snapshot);
        Ok(())
    }
}
