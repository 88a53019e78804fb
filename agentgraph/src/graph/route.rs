//! Conditional edges: typed route labels and routers.
//!
//! A router inspects the state after its node ran and returns one variant of a closed
//! [`Route`] enum. `StateGraph::compile` checks that every declared variant maps to a node
//! or `END`, so a dangling label is a build error rather than a run-time surprise.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::state::GraphState;

/// Closed set of outcomes for one router.
pub trait Route: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every outcome the router may return. Returning anything else at run time is a
    /// `RouterLabel` error.
    fn variants() -> &'static [Self];

    /// Stable label used in logs and error messages.
    fn label(&self) -> &'static str;
}

/// Selects the next edge from the current state.
///
/// Routers may call collaborators (e.g. graders); their errors propagate like node errors.
#[async_trait]
pub trait Router<S, R>: Send + Sync
where
    S: GraphState,
    R: Route,
{
    async fn route(&self, state: &S) -> Result<R, AgentError>;
}

/// Router backed by a plain function of the state.
pub struct FnRouter<F>(pub F);

#[async_trait]
impl<S, R, F> Router<S, R> for FnRouter<F>
where
    S: GraphState,
    R: Route,
    F: Fn(&S) -> R + Send + Sync,
{
    async fn route(&self, state: &S) -> Result<R, AgentError> {
        Ok((self.0)(state))
    }
}

/// Wraps a synchronous routing function as a shared router.
pub fn route_fn<S, R, F>(f: F) -> Arc<dyn Router<S, R>>
where
    S: GraphState,
    R: Route,
    F: Fn(&S) -> R + Send + Sync + 'static,
{
    Arc::new(FnRouter(f))
}

/// Router with its label type erased, as stored in the compiled graph.
#[async_trait]
pub(crate) trait ErasedRouter<S>: Send + Sync {
    /// Runs the router and checks the result against the declared variants.
    async fn route_label(&self, node_id: &str, state: &S) -> Result<&'static str, AgentError>;

    fn declared_labels(&self) -> Vec<&'static str>;
}

pub(crate) struct TypedRouter<S, R> {
    pub(crate) router: Arc<dyn Router<S, R>>,
}

#[async_trait]
impl<S, R> ErasedRouter<S> for TypedRouter<S, R>
where
    S: GraphState,
    R: Route,
{
    async fn route_label(&self, node_id: &str, state: &S) -> Result<&'static str, AgentError> {
        let outcome = self.router.route(state).await?;
        if !R::variants().contains(&outcome) {
            return Err(AgentError::RouterLabel {
                node: node_id.to_string(),
                label: outcome.label().to_string(),
            });
        }
        Ok(outcome.label())
    }

    fn declared_labels(&self) -> Vec<&'static str> {
        R::variants().iter().map(Route::label).collect()
    }
}
