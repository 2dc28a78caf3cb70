//! Context assembly
//!
//! Combines classification, normalized records and static business facts
//! into the [`ContextBundle`] handed to the generative model. Produces no
//! natural language of its own.

use vyapar_core::{
    Analysis, BundleData, BundleQuery, BusinessFacts, ContextBundle, InstructionFlags,
    NormalizedData, QueryContext,
};

#[derive(Debug, Clone)]
pub struct ContextAssembler {
    facts: BusinessFacts,
}

impl ContextAssembler {
    pub fn new(facts: BusinessFacts) -> Self {
        Self { facts }
    }

    pub fn facts(&self) -> &BusinessFacts {
        &self.facts
    }

    /// Build the bundle; summary counts are taken from `data` itself
    pub fn assemble(
        &self,
        original: &str,
        context: QueryContext,
        data: NormalizedData,
        fallback_mode: bool,
    ) -> ContextBundle {
        let data = BundleData::from_normalized(data);
        let analysis = Analysis::for_intent(
            context.intent,
            &data.summary,
            context.timeframe.first().copied(),
        );
        let instructions = InstructionFlags::new(context.language, &self.facts.currency_symbol);

        ContextBundle {
            query: BundleQuery {
                original: original.to_string(),
                context,
            },
            analysis,
            data,
            business_context: self.facts.clone(),
            instructions,
            fallback_mode,
        }
    }
}
