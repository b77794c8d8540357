use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::db::{
    AcertoRepository, AuditoriaRepository, BeneficiamentoRepository, CatalogoRepository,
    ConfiguracaoRepository, DashboardRepository, EntradaRepository, LmeRepository,
    SaidaRepository, SubloteRepository,
};
use crate::services::lme_service::ProvedorCotacaoHttp;
use crate::services::{
    AcertoService, AuditoriaService, BeneficiamentoService, CatalogoService,
    ConfiguracaoService, DashboardService, EntradaService, ImportacaoService, LmeService,
    SaidaService,
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalogo_service: CatalogoService,
    pub entrada_service: EntradaService,
    pub beneficiamento_service: BeneficiamentoService,
    pub saida_service: SaidaService,
    pub acerto_service: AcertoService,
    pub lme_service: LmeService,
    pub importacao_service: ImportacaoService,
    pub configuracao_service: ConfiguracaoService,
    pub auditoria_service: AuditoriaService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // Carrega as configurações, conecta no banco e monta os services
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let lme_api_url = env::var("LME_API_URL")
            .unwrap_or_else(|_| "https://api.metals.live/v1/latest".to_string());

        let db_pool = match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await
        {
            Ok(pool) => {
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
                pool
            }
            Err(e) => {
                tracing::error!("🔥 Falha ao conectar ao banco de dados: {:?}", e);
                std::process::exit(1);
            }
        };

        let catalogo_repo = CatalogoRepository::new(db_pool.clone());
        let entrada_repo = EntradaRepository::new(db_pool.clone());
        let sublote_repo = SubloteRepository::new(db_pool.clone());
        let beneficiamento_repo = BeneficiamentoRepository::new(db_pool.clone());
        let saida_repo = SaidaRepository::new(db_pool.clone());
        let acerto_repo = AcertoRepository::new(db_pool.clone());
        let lme_repo = LmeRepository::new(db_pool.clone());
        let auditoria_repo = AuditoriaRepository::new(db_pool.clone());
        let configuracao_repo = ConfiguracaoRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let provedor_cotacao = Arc::new(ProvedorCotacaoHttp::new(
            reqwest::Client::new(),
            lme_api_url,
        ));

        Self {
            catalogo_service: CatalogoService::new(catalogo_repo.clone()),
            entrada_service: EntradaService::new(
                entrada_repo.clone(),
                sublote_repo.clone(),
                auditoria_repo.clone(),
            ),
            beneficiamento_service: BeneficiamentoService::new(
                beneficiamento_repo,
                sublote_repo.clone(),
                entrada_repo.clone(),
                configuracao_repo.clone(),
                auditoria_repo.clone(),
            ),
            saida_service: SaidaService::new(
                saida_repo,
                sublote_repo.clone(),
                acerto_repo.clone(),
                auditoria_repo.clone(),
            ),
            acerto_service: AcertoService::new(acerto_repo, auditoria_repo.clone()),
            lme_service: LmeService::new(lme_repo, auditoria_repo.clone(), provedor_cotacao),
            importacao_service: ImportacaoService::new(
                db_pool.clone(),
                sublote_repo,
                entrada_repo,
                catalogo_repo.clone(),
                auditoria_repo.clone(),
            ),
            configuracao_service: ConfiguracaoService::new(
                configuracao_repo,
                catalogo_repo,
                auditoria_repo.clone(),
            ),
            auditoria_service: AuditoriaService::new(auditoria_repo),
            dashboard_service: DashboardService::new(dashboard_repo),
            db_pool,
        }
    }
}
