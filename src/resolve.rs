use std::sync::Arc;

use anyhow::Result;
use futures_util::future::BoxFuture;

/// Async lookup keyed by context and a string (choice key or menu path).
pub type ContextKeyFn<C, T> =
    Arc<dyn for<'a> Fn(&'a C, &'a str) -> BoxFuture<'a, Result<T>> + Send + Sync>;

/// Async lookup that only needs the context.
pub type ContextFn<C, T> = Arc<dyn for<'a> Fn(&'a C) -> BoxFuture<'a, Result<T>> + Send + Sync>;

pub fn context_key_fn<C, T, F>(f: F) -> ContextKeyFn<C, T>
where
    F: for<'a> Fn(&'a C, &'a str) -> BoxFuture<'a, Result<T>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// An option that is either fixed for the whole menu or resolved per context and key.
pub enum ConstOrResolver<C, T> {
    Const(T),
    Resolver(ContextKeyFn<C, T>),
}

impl<C, T> ConstOrResolver<C, T> {
    pub fn resolver<F>(f: F) -> Self
    where
        F: for<'a> Fn(&'a C, &'a str) -> BoxFuture<'a, Result<T>> + Send + Sync + 'static,
    {
        Self::Resolver(context_key_fn(f))
    }

    pub async fn resolve(&self, ctx: &C, key: &str) -> Result<T>
    where
        T: Clone,
    {
        match self {
            Self::Const(value) => Ok(value.clone()),
            Self::Resolver(f) => f(ctx, key).await,
        }
    }

    pub fn is_resolver(&self) -> bool {
        matches!(self, Self::Resolver(_))
    }
}

impl<C, T: Default> Default for ConstOrResolver<C, T> {
    fn default() -> Self {
        Self::Const(T::default())
    }
}

impl<C, T: Clone> Clone for ConstOrResolver<C, T> {
    fn clone(&self) -> Self {
        match self {
            Self::Const(value) => Self::Const(value.clone()),
            Self::Resolver(f) => Self::Resolver(f.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ctx {
        suffix: &'static str,
    }

    #[tokio::test]
    async fn test_const_ignores_context_and_key() -> Result<()> {
        let value: ConstOrResolver<Ctx, Option<String>> = ConstOrResolver::Const(Some("icon".into()));
        let ctx = Ctx { suffix: "!" };

        assert_eq!(value.resolve(&ctx, "a").await?, Some("icon".to_string()));
        assert_eq!(value.resolve(&ctx, "b").await?, Some("icon".to_string()));
        assert!(!value.is_resolver());
        Ok(())
    }

    #[tokio::test]
    async fn test_resolver_sees_context_and_key() -> Result<()> {
        let value: ConstOrResolver<Ctx, String> = ConstOrResolver::resolver(|ctx: &Ctx, key| {
            Box::pin(async move { Ok(format!("{}{}", key, ctx.suffix)) })
        });
        let ctx = Ctx { suffix: "!" };

        assert_eq!(value.resolve(&ctx, "a").await?, "a!");
        assert!(value.is_resolver());
        Ok(())
    }

    #[tokio::test]
    async fn test_resolver_error_propagates() {
        let value: ConstOrResolver<Ctx, bool> = ConstOrResolver::resolver(|_: &Ctx, key| {
            Box::pin(async move { Err(anyhow::anyhow!("lookup failed for {}", key)) })
        });
        let ctx = Ctx { suffix: "" };

        let err = value.resolve(&ctx, "x").await.unwrap_err();
        assert_eq!(err.to_string(), "lookup failed for x");
    }

    #[test]
    fn test_default_is_const_default() {
        let value: ConstOrResolver<Ctx, Option<u8>> = ConstOrResolver::default();
        assert!(matches!(value, ConstOrResolver::Const(None)));
    }
}
