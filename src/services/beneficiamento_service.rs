// src/services/beneficiamento_service.rs

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use sqlx::{Acquire, Executor, PgConnection, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        AuditoriaRepository, BeneficiamentoRepository, ConfiguracaoRepository,
        EntradaRepository, SubloteRepository,
    },
    domain::consolidacao::{
        self, GrupoDocumento, GrupoProduto, IndiceCatalogo, LoteCatalogo, PercentuaisPerda,
    },
    domain::custos::{self, InsumoRateio, ResumoCustos, TarifasBeneficiamento},
    models::beneficiamento::{
        Beneficiamento, BeneficiamentoDetalhe, StatusBeneficiamento,
    },
    models::sublote::{StatusSublote, SubloteCatalogo},
};

/// Entrada da criação/simulação de um beneficiamento, com os percentuais
/// por produto como parâmetro explícito (nada de estado ambiente de
/// diálogo).
#[derive(Debug, Clone)]
pub struct ParametrosCriacao {
    pub sublote_ids: Vec<Uuid>,
    pub perdas_por_produto: HashMap<String, PercentuaisPerda>,
    pub tarifas: TarifasBeneficiamento,
}

/// Prévia calculada sem persistir nada (o que o diálogo mostra antes de
/// confirmar).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SimulacaoBeneficiamento {
    pub grupos_produto: Vec<GrupoProduto>,
    pub grupos_documento: Vec<GrupoDocumento>,
    pub custos: ResumoCustos,
}

struct Consolidacao {
    grupos: Vec<GrupoProduto>,
    documentos: Vec<GrupoDocumento>,
    custos: ResumoCustos,
    selecionados: Vec<SubloteCatalogo>,
}

#[derive(Clone)]
pub struct BeneficiamentoService {
    repo: BeneficiamentoRepository,
    sublote_repo: SubloteRepository,
    entrada_repo: EntradaRepository,
    configuracao_repo: ConfiguracaoRepository,
    auditoria_repo: AuditoriaRepository,
}

impl BeneficiamentoService {
    pub fn new(
        repo: BeneficiamentoRepository,
        sublote_repo: SubloteRepository,
        entrada_repo: EntradaRepository,
        configuracao_repo: ConfiguracaoRepository,
        auditoria_repo: AuditoriaRepository,
    ) -> Self {
        Self {
            repo,
            sublote_repo,
            entrada_repo,
            configuracao_repo,
            auditoria_repo,
        }
    }

    /// Monta a consolidação e o rateio de custos a partir do estado atual
    /// do catálogo. Com `estrito`, todo sublote selecionado precisa
    /// existir e estar disponível (exigência das mutações; a simulação
    /// tolera e apenas ignora).
    async fn montar_consolidacao(
        &self,
        conn: &mut PgConnection,
        parametros: &ParametrosCriacao,
        estrito: bool,
    ) -> Result<Consolidacao, AppError> {
        consolidacao::validar_percentuais(&parametros.perdas_por_produto)?;

        let catalogo_rows = self.sublote_repo.listar_catalogo(&mut *conn).await?;
        let por_id: HashMap<Uuid, &SubloteCatalogo> =
            catalogo_rows.iter().map(|s| (s.id, s)).collect();

        if estrito {
            for id in &parametros.sublote_ids {
                match por_id.get(id) {
                    None => return Err(AppError::NaoEncontrado("Sublote")),
                    Some(s) if s.status != StatusSublote::Disponivel => {
                        return Err(AppError::RegraDeNegocio(format!(
                            "Sublote {} não está disponível",
                            s.codigo
                        )));
                    }
                    Some(_) => {}
                }
            }
        }

        let catalogo: Vec<LoteCatalogo> = catalogo_rows
            .iter()
            .map(|s| LoteCatalogo {
                id: s.id,
                codigo_produto: s.codigo_produto.clone(),
                peso: s.peso,
                sublote_pai_id: s.sublote_pai_id,
                entrada_id: s.entrada_id,
            })
            .collect();
        let indice = IndiceCatalogo::construir(&catalogo);

        consolidacao::validar_selecao(&parametros.sublote_ids, &indice)?;

        // Valores dos documentos referenciados. Documento que não gera
        // custo (material só para beneficiar) entra no grupo com valor
        // zero: o flag do documento, não a sua estrutura, manda no
        // encargo.
        let entrada_ids: Vec<Uuid> = {
            let mut ids: Vec<Uuid> = parametros
                .sublote_ids
                .iter()
                .filter_map(|id| por_id.get(id).map(|s| s.entrada_id))
                .collect();
            ids.sort();
            ids.dedup();
            ids
        };
        let entradas = self.entrada_repo.listar_por_ids(&mut *conn, &entrada_ids).await?;
        let valores_por_entrada: HashMap<Uuid, Decimal> = entradas
            .iter()
            .map(|e| {
                let valor = if e.gera_custo { e.valor_total } else { Decimal::ZERO };
                (e.id, valor)
            })
            .collect();

        let configuracao = self.configuracao_repo.obter(&mut *conn).await?;

        let grupos = consolidacao::consolidar_por_produto(
            &parametros.sublote_ids,
            &indice,
            &parametros.perdas_por_produto,
        );
        let documentos = consolidacao::consolidar_por_documento(
            &parametros.sublote_ids,
            &indice,
            &valores_por_entrada,
            configuracao.taxa_financeira_pct,
        );
        let resumo = custos::calcular_custos(&grupos, &documentos, &parametros.tarifas);

        let selecionados: Vec<SubloteCatalogo> = parametros
            .sublote_ids
            .iter()
            .filter_map(|id| por_id.get(id).map(|s| (*s).clone()))
            .collect();

        Ok(Consolidacao {
            grupos,
            documentos,
            custos: resumo,
            selecionados,
        })
    }

    /// Prévia de consolidação e custos, nada é gravado.
    pub async fn simular<'e, E>(
        &self,
        executor: E,
        parametros: &ParametrosCriacao,
    ) -> Result<SimulacaoBeneficiamento, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;
        let consolidado = self
            .montar_consolidacao(&mut conn, parametros, false)
            .await?;

        Ok(SimulacaoBeneficiamento {
            grupos_produto: consolidado.grupos,
            grupos_documento: consolidado.documentos,
            custos: consolidado.custos,
        })
    }

    /// Cria a operação em andamento: cabeçalho + grupos + documentos +
    /// insumos + troca de status dos sublotes, tudo em uma transação.
    pub async fn criar<'e, E>(
        &self,
        executor: E,
        ator: &str,
        parametros: &ParametrosCriacao,
    ) -> Result<BeneficiamentoDetalhe, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let consolidado = self.montar_consolidacao(&mut tx, parametros, true).await?;

        let codigo = self.repo.proximo_codigo(&mut *tx).await?;
        let operacao = self
            .repo
            .criar(
                &mut *tx,
                &codigo,
                &consolidado.custos,
                parametros.tarifas.frete_entrada_por_kg,
                parametros.tarifas.frete_saida_por_kg,
                parametros.tarifas.mao_obra_terceiro_por_kg,
                parametros.tarifas.mao_obra_propria_por_kg,
            )
            .await?;

        let mut grupos_produto = Vec::with_capacity(consolidado.grupos.len());
        for grupo in &consolidado.grupos {
            grupos_produto.push(
                self.repo
                    .inserir_grupo_produto(&mut *tx, operacao.id, grupo)
                    .await?,
            );
        }

        let mut grupos_documento = Vec::with_capacity(consolidado.documentos.len());
        for documento in &consolidado.documentos {
            grupos_documento.push(
                self.repo
                    .inserir_grupo_documento(&mut *tx, operacao.id, documento)
                    .await?,
            );
        }

        let mut insumos = Vec::with_capacity(consolidado.selecionados.len());
        for sublote in &consolidado.selecionados {
            insumos.push(
                self.repo
                    .inserir_insumo(
                        &mut *tx,
                        operacao.id,
                        sublote.id,
                        sublote.peso,
                        sublote.custo_unitario,
                    )
                    .await?,
            );
        }

        self.sublote_repo
            .atualizar_status(
                &mut *tx,
                &parametros.sublote_ids,
                StatusSublote::EmBeneficiamento,
            )
            .await?;

        self.auditoria_repo
            .registrar(
                &mut *tx,
                ator,
                "criar",
                "beneficiamento",
                Some(operacao.id),
                json!({
                    "codigo": operacao.codigo,
                    "sublotes": parametros.sublote_ids,
                    "pesoEntrada": consolidado.custos.peso_entrada,
                    "custoTotal": consolidado.custos.custo_total,
                }),
            )
            .await?;

        tx.commit().await?;

        Ok(BeneficiamentoDetalhe {
            operacao,
            grupos_produto,
            grupos_documento,
            insumos,
        })
    }

    /// Finaliza com o peso real apurado: consome insumos (e filhos
    /// intermediários), deriva os lotes de saída e regrava os custos. O
    /// encargo financeiro vem das linhas persistidas na criação, não da
    /// taxa global vigente.
    pub async fn finalizar<'e, E>(
        &self,
        executor: E,
        ator: &str,
        id: Uuid,
        peso_real_saida: Decimal,
        destino: Option<&str>,
    ) -> Result<Beneficiamento, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let operacao = self
            .repo
            .buscar_por_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Beneficiamento"))?;
        if operacao.status != StatusBeneficiamento::EmAndamento {
            return Err(AppError::RegraDeNegocio(format!(
                "Beneficiamento {} já foi finalizado",
                operacao.codigo
            )));
        }

        let documentos = self.repo.listar_grupos_documento(&mut *tx, id).await?;
        let custo_financeiro: Decimal =
            documentos.iter().map(|d| d.encargo_financeiro).sum();
        let custo_total = operacao.custo_operacional + custo_financeiro;

        let insumos = self.repo.listar_insumos(&mut *tx, id).await?;
        let rateio: Vec<InsumoRateio> = insumos
            .iter()
            .map(|i| InsumoRateio {
                sublote_id: i.sublote_id,
                peso: i.peso_consumido,
                custo_unitario_original: i.custo_unitario_original,
            })
            .collect();
        let derivados = custos::ratear_finalizacao(&rateio, custo_total, peso_real_saida)?;

        // Dados de origem antes de consumir (produto/proprietário/entrada
        // herdados pelos derivados).
        let insumo_ids: Vec<Uuid> = insumos.iter().map(|i| i.sublote_id).collect();
        let origens = self.sublote_repo.listar_por_ids(&mut *tx, &insumo_ids).await?;
        let origem_por_id: HashMap<Uuid, _> =
            origens.iter().map(|s| (s.id, s)).collect();

        // Consome filhos intermediários pré-existentes e os próprios
        // insumos (peso vai a zero).
        for insumo in &insumos {
            let filhos = self
                .sublote_repo
                .buscar_filhos(&mut *tx, insumo.sublote_id)
                .await?;
            for filho in filhos {
                if filho.status != StatusSublote::Consumido
                    && filho.status != StatusSublote::Vendido
                {
                    self.sublote_repo
                        .atualizar_status_e_peso(
                            &mut *tx,
                            filho.id,
                            StatusSublote::Consumido,
                            Decimal::ZERO,
                        )
                        .await?;
                }
            }

            self.sublote_repo
                .atualizar_status_e_peso(
                    &mut *tx,
                    insumo.sublote_id,
                    StatusSublote::Consumido,
                    Decimal::ZERO,
                )
                .await?;
        }

        for (indice, derivado) in derivados.iter().enumerate() {
            let origem = origem_por_id
                .get(&derivado.sublote_origem_id)
                .ok_or(AppError::NaoEncontrado("Sublote de origem"))?;

            let codigo = format!("{}-{:02}", operacao.codigo, indice + 1);
            self.sublote_repo
                .criar(
                    &mut *tx,
                    &codigo,
                    derivado.peso.round_dp(3),
                    origem.produto_id,
                    origem.proprietario_id,
                    origem.entrada_id,
                    derivado.custo_unitario.round_dp(4),
                    Some(origem.id),
                    Some(operacao.id),
                )
                .await?;
        }

        let atualizado = self
            .repo
            .registrar_finalizacao(
                &mut *tx,
                id,
                peso_real_saida,
                custo_financeiro.round_dp(2),
                custo_total.round_dp(2),
                destino,
                Utc::now(),
            )
            .await?;

        self.auditoria_repo
            .registrar(
                &mut *tx,
                ator,
                "finalizar",
                "beneficiamento",
                Some(id),
                json!({
                    "codigo": atualizado.codigo,
                    "pesoRealSaida": peso_real_saida,
                    "custoTotal": custo_total,
                    "lotesDerivados": derivados.len(),
                }),
            )
            .await?;

        tx.commit().await?;
        Ok(atualizado)
    }

    /// Exclui uma operação ainda em andamento, restaurando cada insumo ao
    /// status disponível com o peso gravado no vínculo. Lotes derivados já
    /// referenciados por saída bloqueiam a exclusão; os demais são
    /// removidos com os netos religados ao ancestral sobrevivente.
    pub async fn excluir<'e, E>(
        &self,
        executor: E,
        ator: &str,
        id: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let operacao = self
            .repo
            .buscar_por_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Beneficiamento"))?;
        if operacao.status != StatusBeneficiamento::EmAndamento {
            return Err(AppError::RegraDeNegocio(format!(
                "Beneficiamento {} já foi finalizado e não pode ser excluído",
                operacao.codigo
            )));
        }

        let derivados = self.sublote_repo.listar_derivados_de(&mut *tx, id).await?;
        for derivado in &derivados {
            let vendido = derivado.status == StatusSublote::Vendido
                || self
                    .sublote_repo
                    .referenciado_em_saida(&mut *tx, derivado.id)
                    .await?;
            if vendido {
                return Err(AppError::RegraDeNegocio(format!(
                    "Lote derivado {} já foi referenciado por uma saída",
                    derivado.codigo
                )));
            }
        }

        for derivado in &derivados {
            let netos = self.sublote_repo.buscar_filhos(&mut *tx, derivado.id).await?;
            for neto in netos {
                self.sublote_repo
                    .atualizar_pai(&mut *tx, neto.id, derivado.sublote_pai_id)
                    .await?;
            }
            self.sublote_repo.excluir(&mut *tx, derivado.id).await?;
        }

        let insumos = self.repo.listar_insumos(&mut *tx, id).await?;
        for insumo in &insumos {
            self.sublote_repo
                .atualizar_status_e_peso(
                    &mut *tx,
                    insumo.sublote_id,
                    StatusSublote::Disponivel,
                    insumo.peso_consumido,
                )
                .await?;
        }

        self.repo.excluir(&mut *tx, id).await?;

        self.auditoria_repo
            .registrar(
                &mut *tx,
                ator,
                "excluir",
                "beneficiamento",
                Some(id),
                json!({
                    "codigo": operacao.codigo,
                    "insumosRestaurados": insumos.len(),
                }),
            )
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn listar<'e, E>(
        &self,
        executor: E,
        status: Option<StatusBeneficiamento>,
    ) -> Result<Vec<Beneficiamento>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.listar(executor, status).await
    }

    pub async fn detalhe<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<BeneficiamentoDetalhe, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let operacao = self
            .repo
            .buscar_por_id(&mut *conn, id)
            .await?
            .ok_or(AppError::NaoEncontrado("Beneficiamento"))?;
        let grupos_produto = self.repo.listar_grupos_produto(&mut *conn, id).await?;
        let grupos_documento = self.repo.listar_grupos_documento(&mut *conn, id).await?;
        let insumos = self.repo.listar_insumos(&mut *conn, id).await?;

        Ok(BeneficiamentoDetalhe {
            operacao,
            grupos_produto,
            grupos_documento,
            insumos,
        })
    }
}
