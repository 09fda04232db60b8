use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CreatePrizeRequest, Prize, PrizeResponse};
use crate::store::EventStore;

#[derive(Clone)]
pub struct PrizeService {
    store: Arc<EventStore>,
}

impl PrizeService {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// 新建奖品。名额必须为正；等级缺省时按现有奖品数顺延。
    pub fn create(&self, request: CreatePrizeRequest) -> AppResult<PrizeResponse> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError("Prize name is required".into()));
        }
        if request.count == 0 {
            return Err(AppError::ValidationError(
                "Prize count must be positive".into(),
            ));
        }

        let mut state = self.store.write()?;
        let level = request
            .level
            .unwrap_or_else(|| state.prizes.len() as i32 + 1);
        let prize = Prize {
            id: Uuid::new_v4(),
            name,
            image: request.image.unwrap_or_default(),
            level,
            count: request.count,
        };
        state.prizes.push(prize.clone());
        log::info!("Prize created: {} ({} slots)", prize.name, prize.count);
        Ok(PrizeResponse::from_prize(&prize, 0))
    }

    /// 删除奖品。转动中的奖品不能删；若当前轮次正选着它则退回 Idle。
    /// 已产生的中奖记录保留，指向它的内定规则留在原处但不再被解析。
    pub fn delete(&self, prize_id: Uuid) -> AppResult<()> {
        let mut state = self.store.write()?;
        if state.prize(prize_id).is_none() {
            return Err(AppError::NotFound(format!("Prize {prize_id} not found")));
        }
        if state.round.active_prize() == Some(prize_id) {
            if state.round.is_running() {
                return Err(AppError::ValidationError(
                    "Cannot delete the prize while a spin is running".into(),
                ));
            }
            state.round.deselect()?;
        }
        state.prizes.retain(|p| p.id != prize_id);
        log::info!("Prize {prize_id} deleted");
        Ok(())
    }

    /// 奖品列表（带中奖进度），按等级从高到低展示
    pub fn list(&self) -> AppResult<Vec<PrizeResponse>> {
        let state = self.store.read()?;
        let mut list: Vec<PrizeResponse> = state
            .prizes
            .iter()
            .map(|p| PrizeResponse::from_prize(p, state.won_count(p.id)))
            .collect();
        list.sort_by(|a, b| b.level.cmp(&a.level));
        Ok(list)
    }
}
