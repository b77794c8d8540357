// src/db.rs

pub mod acerto_repo;
pub mod auditoria_repo;
pub mod beneficiamento_repo;
pub mod catalogo_repo;
pub mod configuracao_repo;
pub mod dashboard_repo;
pub mod entrada_repo;
pub mod lme_repo;
pub mod saida_repo;
pub mod sublote_repo;

pub use acerto_repo::AcertoRepository;
pub use auditoria_repo::AuditoriaRepository;
pub use beneficiamento_repo::BeneficiamentoRepository;
pub use catalogo_repo::CatalogoRepository;
pub use configuracao_repo::ConfiguracaoRepository;
pub use dashboard_repo::DashboardRepository;
pub use entrada_repo::EntradaRepository;
pub use lme_repo::LmeRepository;
pub use saida_repo::SaidaRepository;
pub use sublote_repo::SubloteRepository;
