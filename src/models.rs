// src/models.rs

pub mod acerto;
pub mod auditoria;
pub mod beneficiamento;
pub mod catalogo;
pub mod configuracao;
pub mod dashboard;
pub mod entrada;
pub mod lme;
pub mod saida;
pub mod sublote;
