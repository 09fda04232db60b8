use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::participant::import_participants,
        handlers::participant::get_participants,
        handlers::prize::get_prizes,
        handlers::prize::create_prize,
        handlers::prize::delete_prize,
        handlers::rule::get_rules,
        handlers::rule::add_rule,
        handlers::rule::remove_rule,
        handlers::draw::get_status,
        handlers::draw::select_prize,
        handlers::draw::deselect_prize,
        handlers::draw::start_round,
        handlers::draw::stop_round,
        handlers::draw::commit_round,
        handlers::draw::discard_round,
        handlers::winner::get_history,
        handlers::winner::get_records,
        handlers::admin::reset,
        handlers::admin::export_snapshot,
        handlers::admin::restore_snapshot,
    ),
    components(
        schemas(
            Participant,
            ParticipantImport,
            ImportParticipantsRequest,
            ImportParticipantsResponse,
            Prize,
            CreatePrizeRequest,
            PrizeResponse,
            RiggedRule,
            AddRuleRequest,
            RemoveRuleRequest,
            RuleResponse,
            WinnerRecord,
            WinnerRecordResponse,
            PrizeWinnersGroup,
            SelectPrizeRequest,
            RoundPhaseName,
            DrawStatusResponse,
            StopRoundResponse,
            CommitRoundResponse,
            EventSnapshot,
            ApiError,
        )
    ),
    tags(
        (name = "participant", description = "Participant pool API"),
        (name = "prize", description = "Prize management API"),
        (name = "rule", description = "Rigged rule API"),
        (name = "draw", description = "Draw round API"),
        (name = "winner", description = "Winner history API"),
        (name = "admin", description = "Reset and snapshot API"),
    ),
    info(
        title = "CyberLuck Backend API",
        version = "1.0.0",
        description = "Live prize-drawing event backend REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
