use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{
    ImportParticipantsResponse, PaginatedResponse, PaginationParams, Participant,
    ParticipantImport, ParticipantQuery,
};
use crate::store::EventStore;

#[derive(Clone)]
pub struct ParticipantService {
    store: Arc<EventStore>,
}

impl ParticipantService {
    pub fn new(store: Arc<EventStore>) -> Self {
        Self { store }
    }

    /// 批量导入参与者。
    /// 标识或姓名为空、批内重复、与现有名单重复的行一律跳过并计数。
    pub fn import(&self, rows: Vec<ParticipantImport>) -> AppResult<ImportParticipantsResponse> {
        if rows.is_empty() {
            return Err(AppError::ValidationError(
                "No participants to import".into(),
            ));
        }

        let mut state = self.store.write()?;
        let mut seen: HashSet<String> =
            state.participants.iter().map(|p| p.id.clone()).collect();
        let mut imported = 0;
        let mut skipped = 0;

        for row in rows {
            let id = row.id.trim().to_string();
            let name = row.name.trim().to_string();
            if id.is_empty() || name.is_empty() {
                skipped += 1;
                continue;
            }
            if !seen.insert(id.clone()) {
                skipped += 1;
                continue;
            }
            state.participants.push(Participant {
                id,
                name,
                department: row
                    .department
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty()),
            });
            imported += 1;
        }

        let total = state.participants.len();
        log::info!("Imported {imported} participants ({skipped} skipped), pool size {total}");
        Ok(ImportParticipantsResponse {
            imported,
            skipped,
            total,
        })
    }

    /// 分页获取参与者名单（导入顺序）
    pub fn list(&self, query: &ParticipantQuery) -> AppResult<PaginatedResponse<Participant>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let state = self.store.read()?;

        let total = state.participants.len() as i64;
        let items: Vec<Participant> = state
            .participants
            .iter()
            .skip(params.get_offset() as usize)
            .take(params.get_limit() as usize)
            .cloned()
            .collect();

        Ok(PaginatedResponse::new(
            items,
            params.page.unwrap_or(1),
            params.page_size.unwrap_or(20),
            total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str) -> ParticipantImport {
        ParticipantImport {
            id: id.to_string(),
            name: name.to_string(),
            department: None,
        }
    }

    #[test]
    fn import_dedups_within_batch_and_against_pool() {
        let store = Arc::new(EventStore::new());
        let service = ParticipantService::new(store.clone());

        let result = service
            .import(vec![row("1", "alice"), row("2", "bob"), row("1", "dup")])
            .unwrap();
        assert_eq!(result.imported, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.total, 2);

        let result = service
            .import(vec![row("2", "again"), row("3", "carol")])
            .unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn import_skips_blank_rows_and_rejects_empty_batch() {
        let store = Arc::new(EventStore::new());
        let service = ParticipantService::new(store);

        assert!(service.import(Vec::new()).is_err());

        let result = service
            .import(vec![row("", "noid"), row("4", "  "), row("5", "dave")])
            .unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(result.skipped, 2);
    }

    #[test]
    fn list_paginates_in_import_order() {
        let store = Arc::new(EventStore::new());
        let service = ParticipantService::new(store);
        let rows: Vec<ParticipantImport> =
            (1..=25).map(|i| row(&i.to_string(), &format!("u{i}"))).collect();
        service.import(rows).unwrap();

        let page = service
            .list(&ParticipantQuery {
                page: Some(2),
                per_page: Some(10),
            })
            .unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.data[0].id, "11");
        assert_eq!(page.total_pages, 3);
    }
}
