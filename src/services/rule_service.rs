use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{AddRuleRequest, RiggedRule, RuleResponse};
use crate::store::EventStore;

#[derive(Clone)]
pub struct RuleService {
    store: Arc<EventStore>,
}

impl RuleService {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// 登记内定规则。奖品与参与者必须存在；
    /// 重复登记允许（抽取时按参与者去重），已中奖者的规则允许登记但不会生效。
    pub fn add(&self, request: AddRuleRequest) -> AppResult<RuleResponse> {
        let mut state = self.store.write()?;
        let prize = state
            .prize(request.prize_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Prize {} not found", request.prize_id)))?;
        let participant = state
            .participants
            .iter()
            .find(|p| p.id == request.participant_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Participant {} not found", request.participant_id))
            })?;

        if state
            .winners
            .iter()
            .any(|w| w.participant.id == participant.id)
        {
            log::warn!(
                "Rigged rule registered for participant {} who has already won",
                participant.id
            );
        }

        state.rigged_rules.push(RiggedRule {
            prize_id: request.prize_id,
            participant_id: request.participant_id,
        });
        log::info!(
            "Rigged rule registered: {} locked for {}",
            participant.name,
            prize.name
        );
        Ok(RuleResponse {
            prize_id: prize.id,
            prize_name: prize.name,
            participant_id: participant.id,
            participant_name: participant.name,
        })
    }

    /// 按 (奖品, 参与者) 对删除规则，同对的重复登记一并移除
    pub fn remove(&self, prize_id: Uuid, participant_id: &str) -> AppResult<usize> {
        let mut state = self.store.write()?;
        let before = state.rigged_rules.len();
        state
            .rigged_rules
            .retain(|r| !(r.prize_id == prize_id && r.participant_id == participant_id));
        let removed = before - state.rigged_rules.len();
        if removed == 0 {
            return Err(AppError::NotFound("Rule not found".into()));
        }
        Ok(removed)
    }

    /// 规则列表（登记顺序）。奖品或参与者已不存在的规则跳过不展示。
    pub fn list(&self) -> AppResult<Vec<RuleResponse>> {
        let state = self.store.read()?;
        let mut list = Vec::new();
        for rule in &state.rigged_rules {
            let Some(prize) = state.prize(rule.prize_id) else {
                continue;
            };
            let Some(participant) = state
                .participants
                .iter()
                .find(|p| p.id == rule.participant_id)
            else {
                continue;
            };
            list.push(RuleResponse {
                prize_id: prize.id,
                prize_name: prize.name.clone(),
                participant_id: participant.id.clone(),
                participant_name: participant.name.clone(),
            });
        }
        Ok(list)
    }
}
