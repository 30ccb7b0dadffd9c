use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::recommend::Recommender;
use crate::rerank::LanguageModel;

pub struct AppState<S, M> {
    pub recommender: Arc<Recommender<S, M>>,
}

impl<S, M> AppState<S, M>
where
    S: CatalogStore + 'static,
    M: LanguageModel + 'static,
{
    pub fn new(recommender: Recommender<S, M>) -> Self {
        Self {
            recommender: Arc::new(recommender),
        }
    }
}

// Manual impl: the collaborators themselves need not be `Clone`.
impl<S, M> Clone for AppState<S, M> {
    fn clone(&self) -> Self {
        Self {
            recommender: Arc::clone(&self.recommender),
        }
    }
}
