//! MF Method Service - 方法同步引擎入口

use std::net::SocketAddr;
use std::sync::Arc;

use secrecy::ExposeSecret;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use adapter_postgres::{create_pool, PostgresConfig};
use config::AppConfig;
use telemetry::{init_metrics, init_tracing, init_tracing_json};

use anvil_mf_method::api::{api_routes, AppState};
use anvil_mf_method::application::handler::MethodHandler;
use anvil_mf_method::infrastructure::persistence::{
    PostgresConfigurationRuleRepository, PostgresItemRepository, PostgresJobRepository,
    PostgresMethodRepository, PostgresProcedureRepository, PostgresQuoteRepository,
    PostgresResourceRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 加载配置
    let app_config = AppConfig::load("config")?;

    // 初始化 tracing 与 metrics
    if app_config.telemetry.json {
        init_tracing_json(&app_config.telemetry.log_level);
    } else {
        init_tracing(&app_config.telemetry.log_level);
    }
    init_metrics(app_config.telemetry.metrics_port);

    info!("Starting {} ({})", app_config.app_name, app_config.app_env);

    // 连接池
    let pg_config = PostgresConfig::new(app_config.database.url.expose_secret())
        .with_max_connections(app_config.database.max_connections);
    let pool = create_pool(&pg_config).await?;
    info!("Database pool ready");

    // 仓储与处理器
    let method_repo = Arc::new(PostgresMethodRepository::new(pool.clone()));
    let item_repo = Arc::new(PostgresItemRepository::new(pool.clone()));
    let job_repo = Arc::new(PostgresJobRepository::new(pool.clone()));
    let quote_repo = Arc::new(PostgresQuoteRepository::new(pool.clone()));
    let resource_repo = Arc::new(PostgresResourceRepository::new(pool.clone()));
    let procedure_repo = Arc::new(PostgresProcedureRepository::new(pool.clone()));
    let rule_repo = Arc::new(PostgresConfigurationRuleRepository::new(pool.clone()));
    let handler = Arc::new(MethodHandler::new(
        method_repo,
        item_repo,
        job_repo,
        quote_repo,
        resource_repo,
        procedure_repo,
        rule_repo,
    ));
    info!("Repositories initialized");

    // 构建路由
    let state = AppState { handler, pool };
    let app = api_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // 启动服务器
    let addr: SocketAddr =
        format!("{}:{}", app_config.server.host, app_config.server.port).parse()?;
    info!(%addr, "Starting mf-method service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
