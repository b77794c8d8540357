// src/handlers.rs

pub mod acertos;
pub mod auditoria;
pub mod beneficiamentos;
pub mod catalogo;
pub mod configuracoes;
pub mod dashboard;
pub mod entradas;
pub mod importacao;
pub mod lme;
pub mod saidas;
pub mod sublotes;

use rust_decimal::Decimal;
use validator::ValidationError;

// ---
// Validação customizada compartilhada pelos payloads
// ---
pub(crate) fn validar_nao_negativo(valor: &Decimal) -> Result<(), ValidationError> {
    if valor.is_sign_negative() {
        let mut erro = ValidationError::new("range");
        erro.add_param("min".into(), &0.0);
        erro.message = Some("O valor não pode ser negativo.".into());
        return Err(erro);
    }
    Ok(())
}
