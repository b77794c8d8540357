// src/services/importacao_service.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditoriaRepository, CatalogoRepository, EntradaRepository, SubloteRepository},
};

/// Linha tabular já extraída da planilha pelo cliente. O parse do arquivo
/// fica fora daqui; este service só cuida do mapeamento de colunas,
/// resolução de referências por nome e rejeição de duplicados.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinhaImportacaoSublote {
    #[schema(example = "SL-0101")]
    pub codigo: String,
    #[schema(example = "850.5")]
    pub peso: Decimal,
    #[schema(example = "Cobre Misto")]
    pub produto_nome: Option<String>,
    #[schema(example = "Metalúrgica Ypê LTDA")]
    pub proprietario_nome: Option<String>,
    #[schema(example = "NF-2026-0142")]
    pub entrada_numero: String,
    pub custo_unitario: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinhaRejeitada {
    pub linha: usize,
    pub codigo: String,
    pub motivo: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelatorioImportacao {
    pub total: usize,
    pub importados: usize,
    pub rejeitados: Vec<LinhaRejeitada>,
}

#[derive(Clone)]
pub struct ImportacaoService {
    pool: PgPool,
    sublote_repo: SubloteRepository,
    entrada_repo: EntradaRepository,
    catalogo_repo: CatalogoRepository,
    auditoria_repo: AuditoriaRepository,
}

impl ImportacaoService {
    pub fn new(
        pool: PgPool,
        sublote_repo: SubloteRepository,
        entrada_repo: EntradaRepository,
        catalogo_repo: CatalogoRepository,
        auditoria_repo: AuditoriaRepository,
    ) -> Self {
        Self {
            pool,
            sublote_repo,
            entrada_repo,
            catalogo_repo,
            auditoria_repo,
        }
    }

    /// Importa as linhas uma a uma: cada linha tem sua própria transação,
    /// e uma linha ruim não derruba o lote inteiro (é a única mutação da
    /// aplicação deliberadamente não atômica de ponta a ponta).
    pub async fn importar_sublotes(
        &self,
        ator: &str,
        linhas: &[LinhaImportacaoSublote],
        auto_criar_referencias: bool,
    ) -> Result<RelatorioImportacao, AppError> {
        let mut importados = 0usize;
        let mut rejeitados = Vec::new();

        for (posicao, linha) in linhas.iter().enumerate() {
            match self.importar_linha(linha, auto_criar_referencias).await {
                Ok(()) => importados += 1,
                Err(erro) => rejeitados.push(LinhaRejeitada {
                    linha: posicao + 1,
                    codigo: linha.codigo.clone(),
                    motivo: erro.to_string(),
                }),
            }
        }

        self.auditoria_repo
            .registrar(
                &self.pool,
                ator,
                "importar",
                "sublote",
                None,
                json!({
                    "total": linhas.len(),
                    "importados": importados,
                    "rejeitados": rejeitados.len(),
                }),
            )
            .await?;

        Ok(RelatorioImportacao {
            total: linhas.len(),
            importados,
            rejeitados,
        })
    }

    async fn importar_linha(
        &self,
        linha: &LinhaImportacaoSublote,
        auto_criar: bool,
    ) -> Result<(), AppError> {
        if linha.codigo.trim().is_empty() {
            return Err(AppError::RegraDeNegocio("Código vazio".to_string()));
        }
        if linha.peso < Decimal::ZERO {
            return Err(AppError::RegraDeNegocio("Peso negativo".to_string()));
        }

        let mut tx = self.pool.begin().await?;

        // Coluna de código é única: linha repetida é rejeitada, nunca
        // sobrescrita.
        if self
            .sublote_repo
            .buscar_por_codigo(&mut *tx, &linha.codigo)
            .await?
            .is_some()
        {
            return Err(AppError::CodigoDuplicado(linha.codigo.clone()));
        }

        let entrada = match self
            .entrada_repo
            .buscar_por_numero(&mut *tx, &linha.entrada_numero)
            .await?
        {
            Some(entrada) => entrada,
            None if auto_criar => {
                self.entrada_repo
                    .criar(
                        &mut *tx,
                        &linha.entrada_numero,
                        None,
                        Decimal::ZERO,
                        true,
                        chrono::Utc::now().date_naive(),
                        Some("Criada pela importação"),
                    )
                    .await?
            }
            None => {
                return Err(AppError::RegraDeNegocio(format!(
                    "Entrada {} não cadastrada",
                    linha.entrada_numero
                )));
            }
        };

        let produto_id = match &linha.produto_nome {
            None => None,
            Some(nome) => Some(self.resolver_produto(&mut tx, nome, auto_criar).await?),
        };

        let proprietario_id = match &linha.proprietario_nome {
            None => None,
            Some(nome) => Some(self.resolver_proprietario(&mut tx, nome, auto_criar).await?),
        };

        self.sublote_repo
            .criar(
                &mut *tx,
                linha.codigo.trim(),
                linha.peso,
                produto_id,
                proprietario_id,
                entrada.id,
                linha.custo_unitario.unwrap_or(Decimal::ZERO),
                None,
                None,
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn resolver_produto(
        &self,
        tx: &mut sqlx::PgConnection,
        nome: &str,
        auto_criar: bool,
    ) -> Result<Uuid, AppError> {
        if let Some(produto) = self.catalogo_repo.buscar_produto_por_nome(&mut *tx, nome).await? {
            return Ok(produto.id);
        }
        if !auto_criar {
            return Err(AppError::RegraDeNegocio(format!(
                "Produto {nome} não cadastrado"
            )));
        }

        let codigo = nome.trim().to_uppercase().replace(' ', "-");
        let produto = self
            .catalogo_repo
            .criar_produto(&mut *tx, &codigo, nome.trim(), Decimal::ZERO)
            .await?;
        Ok(produto.id)
    }

    async fn resolver_proprietario(
        &self,
        tx: &mut sqlx::PgConnection,
        nome: &str,
        auto_criar: bool,
    ) -> Result<Uuid, AppError> {
        if let Some(proprietario) = self
            .catalogo_repo
            .buscar_proprietario_por_nome(&mut *tx, nome)
            .await?
        {
            return Ok(proprietario.id);
        }
        if !auto_criar {
            return Err(AppError::RegraDeNegocio(format!(
                "Proprietário {nome} não cadastrado"
            )));
        }

        let proprietario = self
            .catalogo_repo
            .criar_proprietario(&mut *tx, nome.trim(), None, false, Decimal::ZERO)
            .await?;
        Ok(proprietario.id)
    }
}
