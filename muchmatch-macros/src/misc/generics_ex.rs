use syn::{token::Colon, GenericParam, Generics, TypeParamBound};

pub(crate) trait GenericsEx {
    /// Add `bound` to every type parameter.
    fn add_type_bound(self, bound: &TypeParamBound) -> Self;
}

impl GenericsEx for Generics {
    fn add_type_bound(mut self, bound: &TypeParamBound) -> Self {
        for param in &mut self.params {
            if let GenericParam::Type(t) = param {
                if t.colon_token.is_none() {
                    t.colon_token = Some(Colon::default());
                }

                t.bounds.push(bound.clone());
            }
        }

        self
    }
}
