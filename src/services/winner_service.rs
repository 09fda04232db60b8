use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{
    PaginatedResponse, PaginationParams, PrizeResponse, PrizeWinnersGroup, WinnerRecord,
    WinnerRecordQuery, WinnerRecordResponse,
};
use crate::store::EventStore;

#[derive(Clone)]
pub struct WinnerService {
    store: Arc<EventStore>,
}

impl WinnerService {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// 按奖品分组的中奖名单：等级低的奖项在前（一等奖先展示），
    /// 组内新中奖的在前，没有中奖记录的奖品不出现。
    pub fn history(&self) -> AppResult<Vec<PrizeWinnersGroup>> {
        let state = self.store.read()?;
        let mut prizes: Vec<_> = state.prizes.iter().collect();
        prizes.sort_by_key(|p| p.level);

        let mut groups = Vec::new();
        for prize in prizes {
            let mut winners: Vec<&WinnerRecord> = state
                .winners
                .iter()
                .filter(|w| w.prize_id == prize.id)
                .collect();
            if winners.is_empty() {
                continue;
            }
            winners.sort_by(|a, b| b.won_at.cmp(&a.won_at));
            groups.push(PrizeWinnersGroup {
                prize: PrizeResponse::from_prize(prize, winners.len()),
                winners: winners
                    .into_iter()
                    .map(|w| WinnerRecordResponse::from_record(w, Some(prize.name.clone())))
                    .collect(),
            });
        }
        Ok(groups)
    }

    /// 中奖记录平铺分页（新的在前）。奖品已删除的记录保留展示，名称为空。
    pub fn records(
        &self,
        query: &WinnerRecordQuery,
    ) -> AppResult<PaginatedResponse<WinnerRecordResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let state = self.store.read()?;

        let mut records: Vec<&WinnerRecord> = state.winners.iter().collect();
        records.sort_by(|a, b| b.won_at.cmp(&a.won_at));
        let total = records.len() as i64;

        let items: Vec<WinnerRecordResponse> = records
            .into_iter()
            .skip(params.get_offset() as usize)
            .take(params.get_limit() as usize)
            .map(|w| {
                let prize_name = state.prize(w.prize_id).map(|p| p.name.clone());
                WinnerRecordResponse::from_record(w, prize_name)
            })
            .collect();

        Ok(PaginatedResponse::new(
            items,
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(20),
            total,
        ))
    }
}
