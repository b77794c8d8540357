// src/domain.rs
//
// Núcleo de cálculo do beneficiamento: funções puras, sem acesso a banco.
// Os services montam as entradas a partir dos repositórios e persistem as
// saídas dentro de uma transação.

pub mod cenario;
pub mod consolidacao;
pub mod custos;
pub mod liquidacao;
