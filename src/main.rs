//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod domain;
mod handlers;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa o logger uma única vez, aqui no main.
    tracing_subscriber::fmt().with_target(false).compact().init();

    let app_state = AppState::new().await;

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let catalogo_routes = Router::new()
        .route(
            "/produtos",
            post(handlers::catalogo::criar_produto).get(handlers::catalogo::listar_produtos),
        )
        .route(
            "/proprietarios",
            post(handlers::catalogo::criar_proprietario)
                .get(handlers::catalogo::listar_proprietarios),
        );

    let entrada_routes = Router::new().route(
        "/",
        post(handlers::entradas::criar_entrada).get(handlers::entradas::listar_entradas),
    );

    let sublote_routes = Router::new()
        .route("/", get(handlers::sublotes::listar_sublotes))
        .route("/{id}", get(handlers::sublotes::buscar_sublote));

    let beneficiamento_routes = Router::new()
        .route(
            "/",
            post(handlers::beneficiamentos::criar_beneficiamento)
                .get(handlers::beneficiamentos::listar_beneficiamentos),
        )
        .route(
            "/simulacao",
            post(handlers::beneficiamentos::simular_beneficiamento),
        )
        .route(
            "/{id}",
            get(handlers::beneficiamentos::detalhe_beneficiamento)
                .delete(handlers::beneficiamentos::excluir_beneficiamento),
        )
        .route(
            "/{id}/finalizar",
            post(handlers::beneficiamentos::finalizar_beneficiamento),
        );

    let saida_routes = Router::new()
        .route(
            "/",
            post(handlers::saidas::criar_saida).get(handlers::saidas::listar_saidas),
        )
        .route(
            "/{id}",
            get(handlers::saidas::detalhe_saida).delete(handlers::saidas::excluir_saida),
        );

    let acerto_routes = Router::new()
        .route("/", get(handlers::acertos::listar_acertos))
        .route("/{id}/confirmar", post(handlers::acertos::confirmar_acerto));

    let lme_routes = Router::new()
        .route("/atualizar", post(handlers::lme::atualizar_cotacoes))
        .route("/historico", get(handlers::lme::historico_cotacoes))
        .route("/ultimas", get(handlers::lme::ultimas_cotacoes));

    let dashboard_routes = Router::new()
        .route("/resumo", get(handlers::dashboard::resumo))
        .route(
            "/estoque-por-produto",
            get(handlers::dashboard::estoque_por_produto),
        )
        .route(
            "/acertos-pendentes",
            get(handlers::dashboard::acertos_pendentes),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/catalogo", catalogo_routes)
        .nest("/api/entradas", entrada_routes)
        .nest("/api/sublotes", sublote_routes)
        .nest("/api/beneficiamentos", beneficiamento_routes)
        .nest("/api/saidas", saida_routes)
        .nest("/api/acertos", acerto_routes)
        .nest("/api/lme", lme_routes)
        .nest("/api/dashboard", dashboard_routes)
        .route(
            "/api/importacao/sublotes",
            post(handlers::importacao::importar_sublotes),
        )
        .route("/api/auditoria", get(handlers::auditoria::listar_auditoria))
        .route(
            "/api/configuracoes",
            get(handlers::configuracoes::obter_configuracoes)
                .put(handlers::configuracoes::atualizar_configuracoes),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let porta = std::env::var("PORTA").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{porta}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
