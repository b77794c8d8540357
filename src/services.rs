// src/services.rs

pub mod acerto_service;
pub mod auditoria_service;
pub mod beneficiamento_service;
pub mod catalogo_service;
pub mod configuracao_service;
pub mod dashboard_service;
pub mod entrada_service;
pub mod importacao_service;
pub mod lme_service;
pub mod saida_service;

pub use acerto_service::AcertoService;
pub use auditoria_service::AuditoriaService;
pub use beneficiamento_service::BeneficiamentoService;
pub use catalogo_service::CatalogoService;
pub use configuracao_service::ConfiguracaoService;
pub use dashboard_service::DashboardService;
pub use entrada_service::EntradaService;
pub use importacao_service::ImportacaoService;
pub use lme_service::LmeService;
pub use saida_service::SaidaService;
