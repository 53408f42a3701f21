use log::debug;

use crate::error::FlumpError;
use crate::model::{Symbol, SymbolTable};

/// Rewrites every keyframe's symbol name into a [`crate::model::SymbolId`].
///
/// Runs once per load, after every movie and texture is registered. Movies
/// are visited in declaration order. The first unknown name aborts the load.
pub(crate) fn resolve_references(table: &mut SymbolTable) -> Result<(), FlumpError> {
    let SymbolTable { symbols, by_name } = table;
    let mut resolved = 0usize;

    for symbol in symbols.iter_mut() {
        let Symbol::Movie(movie) = symbol else {
            continue;
        };

        for layer in movie.layers.iter_mut() {
            for index in 0..layer.keyframes.len() {
                let keyframe = &mut layer.keyframes[index];
                let Some(name) = keyframe.symbol_name.as_deref() else {
                    continue;
                };

                let id = by_name
                    .get(name)
                    .copied()
                    .ok_or_else(|| FlumpError::MissingSymbol {
                        name: name.to_string(),
                        movie: movie.name.clone(),
                    })?;

                keyframe.symbol = Some(id);
                layer.record_symbol(id);
                resolved += 1;
            }
        }
    }

    debug!("resolved {} keyframe references", resolved);
    Ok(())
}
