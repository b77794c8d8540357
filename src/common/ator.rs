use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Identidade do usuário para fins de auditoria, lida do header
/// `X-Usuario` preenchido pelo gateway de autenticação. A verificação da
/// sessão acontece lá fora, não aqui.
#[derive(Debug, Clone)]
pub struct Ator(pub String);

impl Ator {
    pub fn nome(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Ator
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ator = parts
            .headers
            .get("x-usuario")
            .and_then(|valor| valor.to_str().ok())
            .filter(|nome| !nome.trim().is_empty())
            .unwrap_or("sistema")
            .to_string();

        Ok(Ator(ator))
    }
}
