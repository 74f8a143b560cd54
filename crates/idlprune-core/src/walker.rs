//! Enumerates the user-defined symbols a type expression touches

use idlprune_ast::{TypeExpr, TypeRef};

/// Call `visit` for every named reference inside `ty`
///
/// Primitives are skipped. Containers are walked key first, then value, to
/// any depth. An absent type (a `void` return) visits nothing. The first
/// error returned by `visit` stops the walk.
pub fn for_each_symbol<'t, E, F>(ty: Option<&'t TypeExpr>, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&'t TypeRef) -> Result<(), E>,
{
    let Some(ty) = ty else {
        return Ok(());
    };

    match ty {
        TypeExpr::Primitive(_) => Ok(()),
        TypeExpr::Named(reference) => visit(reference),
        TypeExpr::List(_) | TypeExpr::Set(_) | TypeExpr::Map { .. } => {
            for_each_symbol(ty.key_type(), visit)?;
            for_each_symbol(ty.value_type(), visit)
        }
    }
}

/// Collect the references inside `ty` in visit order
pub fn symbols(ty: &TypeExpr) -> Vec<&TypeRef> {
    let mut out = Vec::new();
    let _ = for_each_symbol(Some(ty), &mut |r| -> Result<(), ()> {
        out.push(r);
        Ok(())
    });
    out
}
