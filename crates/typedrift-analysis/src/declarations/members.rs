//! Baseline member-bag extraction: categorize a declaration's syntactic
//! member list into a normalized [`ClassBag`] or [`EnumBag`].

use typedrift_core::types::member_bag::{ClassBag, EnumBag};

use super::source::{ClassMemberSyntax, DeclarationSyntax, MemberKey, MemberKind};

/// A baseline class bag plus the non-fatal warnings extraction produced.
#[derive(Debug, Clone, Default)]
pub struct BaselineExtraction {
    pub bag: ClassBag,
    pub warns: Vec<String>,
}

/// Extract the normalized bag of a class declaration.
///
/// Abstract members are always skipped; optional members are skipped
/// unless `include_optional` is set. Unsupported key forms are dropped
/// with a warning, never silently miscategorized.
pub fn class_bag_from_syntax(
    decl: &DeclarationSyntax,
    include_optional: bool,
) -> BaselineExtraction {
    let mut out = BaselineExtraction::default();

    for member in &decl.members {
        if member.is_abstract {
            continue;
        }
        if member.is_optional && !include_optional {
            continue;
        }

        let name = match &member.key {
            MemberKey::Ident(name) => name.clone(),
            MemberKey::WellKnownSymbol(symbol) => format!("@@{symbol}"),
            MemberKey::Unsupported(raw) => {
                out.warns.push(format!(
                    "{}: unsupported member key {raw:?}, member skipped",
                    decl.identifier
                ));
                continue;
            }
        };

        categorize(&mut out.bag, member, name);
    }

    out
}

fn categorize(bag: &mut ClassBag, member: &ClassMemberSyntax, name: String) {
    match member.kind {
        MemberKind::Constructor { param_count } => {
            // A zero-parameter constructor carries no structural signal
            // and is treated as no constructor at all.
            if param_count >= 1 {
                bag.has_param_constructor = true;
            }
        }
        MemberKind::Method => {
            if member.is_static {
                bag.static_methods_and_fields.insert(name);
            } else {
                bag.methods.insert(name);
            }
        }
        MemberKind::Getter => {
            if member.is_static {
                bag.static_getters.insert(name);
            } else {
                bag.getters.insert(name);
            }
        }
        MemberKind::Setter => {
            if member.is_static {
                bag.static_setters.insert(name);
            } else {
                bag.setters.insert(name);
            }
        }
        MemberKind::Field => {
            if member.is_static {
                bag.static_methods_and_fields.insert(name);
            } else {
                bag.fields.insert(name);
            }
        }
    }
}

/// Extract the normalized key → value map of an enum declaration.
/// Duplicate keys keep the last occurrence, matching source semantics.
pub fn enum_bag_from_syntax(decl: &DeclarationSyntax) -> EnumBag {
    decl.entries.iter().cloned().collect()
}
