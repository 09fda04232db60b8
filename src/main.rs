use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use cyberluck_backend::{
    config::Config,
    handlers,
    middlewares::create_cors,
    services::*,
    store::EventStore,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 全部活动状态都保存在进程内；落盘由外部适配器通过快照接口完成
    let store = Arc::new(EventStore::new());

    // 创建服务
    let participant_service = ParticipantService::new(store.clone());
    let prize_service = PrizeService::new(store.clone());
    let rule_service = RuleService::new(store.clone());
    let draw_service = DrawService::new(store.clone());
    let winner_service = WinnerService::new(store.clone());
    let admin_service = AdminService::new(store.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(participant_service.clone()))
            .app_data(web::Data::new(prize_service.clone()))
            .app_data(web::Data::new(rule_service.clone()))
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(winner_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::participant_config)
                    .configure(handlers::prize_config)
                    .configure(handlers::rule_config)
                    .configure(handlers::draw_config)
                    .configure(handlers::winner_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
