// src/docs.rs

use utoipa::OpenApi;

use crate::domain;
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Catálogo ---
        handlers::catalogo::criar_produto,
        handlers::catalogo::listar_produtos,
        handlers::catalogo::criar_proprietario,
        handlers::catalogo::listar_proprietarios,

        // --- Entradas / Sublotes ---
        handlers::entradas::criar_entrada,
        handlers::entradas::listar_entradas,
        handlers::sublotes::listar_sublotes,
        handlers::sublotes::buscar_sublote,

        // --- Beneficiamentos ---
        handlers::beneficiamentos::simular_beneficiamento,
        handlers::beneficiamentos::criar_beneficiamento,
        handlers::beneficiamentos::listar_beneficiamentos,
        handlers::beneficiamentos::detalhe_beneficiamento,
        handlers::beneficiamentos::finalizar_beneficiamento,
        handlers::beneficiamentos::excluir_beneficiamento,

        // --- Saídas ---
        handlers::saidas::criar_saida,
        handlers::saidas::listar_saidas,
        handlers::saidas::detalhe_saida,
        handlers::saidas::excluir_saida,

        // --- Acertos ---
        handlers::acertos::listar_acertos,
        handlers::acertos::confirmar_acerto,

        // --- LME ---
        handlers::lme::atualizar_cotacoes,
        handlers::lme::historico_cotacoes,
        handlers::lme::ultimas_cotacoes,

        // --- Importação ---
        handlers::importacao::importar_sublotes,

        // --- Auditoria / Configurações ---
        handlers::auditoria::listar_auditoria,
        handlers::configuracoes::obter_configuracoes,
        handlers::configuracoes::atualizar_configuracoes,

        // --- Dashboard ---
        handlers::dashboard::resumo,
        handlers::dashboard::estoque_por_produto,
        handlers::dashboard::acertos_pendentes,
    ),
    components(
        schemas(
            models::catalogo::Produto,
            models::catalogo::Proprietario,
            models::entrada::Entrada,
            models::sublote::Sublote,
            models::sublote::StatusSublote,
            models::beneficiamento::Beneficiamento,
            models::beneficiamento::BeneficiamentoDetalhe,
            models::beneficiamento::BeneficiamentoProduto,
            models::beneficiamento::BeneficiamentoDocumento,
            models::beneficiamento::BeneficiamentoInsumo,
            models::beneficiamento::StatusBeneficiamento,
            models::saida::Saida,
            models::saida::SaidaDetalhe,
            models::saida::SaidaSublote,
            models::acerto::AcertoFinanceiro,
            models::acerto::TipoAcerto,
            models::acerto::StatusAcerto,
            models::lme::CotacaoLme,
            models::auditoria::RegistroAuditoria,
            models::configuracao::ConfiguracaoGlobal,
            models::dashboard::ResumoDashboard,
            models::dashboard::EstoquePorProduto,
            models::dashboard::AcertoPendentePorProprietario,
            domain::cenario::Cenario,
            domain::consolidacao::PercentuaisPerda,
            domain::consolidacao::GrupoProduto,
            domain::consolidacao::GrupoDocumento,
            domain::custos::TarifasBeneficiamento,
            domain::custos::ResumoCustos,
            services::beneficiamento_service::SimulacaoBeneficiamento,
            services::importacao_service::LinhaImportacaoSublote,
            services::importacao_service::RelatorioImportacao,
            services::importacao_service::LinhaRejeitada,
            handlers::catalogo::CriarProdutoPayload,
            handlers::catalogo::CriarProprietarioPayload,
            handlers::entradas::CriarEntradaPayload,
            handlers::entradas::SubloteEntradaPayload,
            handlers::entradas::EntradaCriada,
            handlers::beneficiamentos::CriarBeneficiamentoPayload,
            handlers::beneficiamentos::FinalizarBeneficiamentoPayload,
            handlers::saidas::CriarSaidaPayload,
            handlers::configuracoes::AtualizarConfiguracaoPayload,
            handlers::importacao::ImportarSublotesPayload,
        )
    ),
    tags(
        (name = "Catalogo", description = "Produtos e proprietários de material"),
        (name = "Entradas", description = "Documentos de entrada e sublotes iniciais"),
        (name = "Sublotes", description = "Consulta de sublotes"),
        (name = "Beneficiamentos", description = "Consolidação, custos e ciclo de vida das operações"),
        (name = "Saidas", description = "Saídas classificadas por cenário e seus acertos"),
        (name = "Acertos", description = "Acertos financeiros com proprietários"),
        (name = "LME", description = "Cotações de metais"),
        (name = "Importacao", description = "Importação tabular"),
        (name = "Auditoria", description = "Trilha de auditoria"),
        (name = "Configuracoes", description = "Configurações globais"),
        (name = "Dashboard", description = "Agregados do painel"),
    ),
    info(
        title = "IBRAC Backend",
        description = "Gestão de beneficiamento e comercialização de metais: entradas, sublotes, beneficiamentos, saídas por cenário, acertos financeiros, cotações LME e auditoria.",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
