//! Member types and the type names they resolve to.
//!
//! Only the forms binding checks can act on are interpreted. Everything else
//! is reported as `None`, meaning "unknown type", never as an error.

use crate::syntax::{Keyword, Member, MemberKind, TypeNode};

/// Declared type of a class element: property, method (return type) or get
/// accessor.
pub fn class_element_type(member: &Member) -> Option<&TypeNode> {
    match member.kind {
        MemberKind::Property | MemberKind::Method | MemberKind::GetAccessor => member.ty.as_ref(),
        _ => None,
    }
}

/// Declared type of an interface or type-literal element: property or method
/// signature.
pub fn type_element_type(member: &Member) -> Option<&TypeNode> {
    match member.kind {
        MemberKind::PropertySignature | MemberKind::MethodSignature => member.ty.as_ref(),
        _ => None,
    }
}

/// Declared type of any member, dispatching on whether it belongs to a class
/// or an interface body. Interface accessors count like class accessors.
pub fn member_type(member: &Member) -> Option<&TypeNode> {
    class_element_type(member).or_else(|| type_element_type(member))
}

/// Resolvable name of a type node.
///
/// `T[]` and `Array<T>` unwrap to `T`; other references yield their (dotted)
/// name; `string`, `number` and `boolean` yield themselves.
pub fn type_name(node: &TypeNode) -> Option<&str> {
    match node {
        TypeNode::Array(element) => type_name(element),
        TypeNode::Reference { name, args } if name == "Array" => type_name(args.first()?),
        TypeNode::Reference { name, .. } => Some(name),
        TypeNode::Keyword(k @ (Keyword::String | Keyword::Number | Keyword::Boolean)) => {
            Some(k.as_str())
        }
        _ => None,
    }
}

/// Whether `node` is an array type, in either spelling.
pub fn is_array(node: &TypeNode) -> bool {
    match node {
        TypeNode::Array(_) => true,
        TypeNode::Reference { name, .. } => name == "Array",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{parse_module, Declaration};

    fn decl(src: &str) -> Declaration {
        parse_module(src)
            .into_iter()
            .find_map(|s| s.as_declaration().cloned())
            .unwrap()
    }

    fn name_of(decl: &Declaration, member: &str) -> Option<String> {
        let member = decl.member(member)?;
        type_name(member_type(member)?).map(str::to_string)
    }

    #[test]
    fn test_class_member_type_names() {
        let d = decl(
            r#"class Vm {
                items: Item[];
                nested: Item[][];
                generic: Array<Item>;
                bare: Array;
                label: string;
                count: number;
                flag: boolean;
                other: any;
                union: string | null;
                dotted: ns.Thing;
                load(): Promise<Item> { return null }
                get total(): number { return 1 }
                set total(v: number) {}
                constructor(a: string) {}
                untyped = 1;
            }"#,
        );
        assert_eq!(name_of(&d, "items").as_deref(), Some("Item"));
        assert_eq!(name_of(&d, "nested").as_deref(), Some("Item"));
        assert_eq!(name_of(&d, "generic").as_deref(), Some("Item"));
        assert_eq!(name_of(&d, "bare"), None);
        assert_eq!(name_of(&d, "label").as_deref(), Some("string"));
        assert_eq!(name_of(&d, "count").as_deref(), Some("number"));
        assert_eq!(name_of(&d, "flag").as_deref(), Some("boolean"));
        assert_eq!(name_of(&d, "other"), None);
        assert_eq!(name_of(&d, "union"), None);
        assert_eq!(name_of(&d, "dotted").as_deref(), Some("ns.Thing"));
        assert_eq!(name_of(&d, "load").as_deref(), Some("Promise"));
        assert_eq!(name_of(&d, "total").as_deref(), Some("number"));
        assert_eq!(name_of(&d, "constructor"), None);
        assert_eq!(name_of(&d, "untyped"), None);
    }

    #[test]
    fn test_set_accessor_and_index_signature_have_no_type() {
        let d = decl("class A { set v(x: string) {} [k: string]: number; }");
        assert!(d.members().iter().all(|m| member_type(m).is_none()));
    }

    #[test]
    fn test_interface_element_types() {
        let d = decl("interface P { a: Foo; b(): string; (x: number): Bar; new (): Baz; }");
        let members = d.members();
        assert_eq!(type_element_type(&members[0]).and_then(type_name), Some("Foo"));
        assert_eq!(type_element_type(&members[1]).and_then(type_name), Some("string"));
        assert!(type_element_type(&members[2]).is_none());
        assert!(type_element_type(&members[3]).is_none());
        assert!(class_element_type(&members[0]).is_none());
    }

    #[test]
    fn test_is_array() {
        let d = decl("class A { a: X[]; b: Array<X>; c: X; }");
        let flags: Vec<_> = d
            .members()
            .iter()
            .map(|m| member_type(m).map(is_array))
            .collect();
        assert_eq!(flags, vec![Some(true), Some(true), Some(false)]);
    }
}
