//! Reserved short names for primitive and well-known types.

/// Namespace holding the primitive types.
pub const SYSTEM_NAMESPACE: &str = "System";

const SYSTEM_TYPES: &[(&str, &str)] = &[
    ("Void", "void"),
    ("Object", "object"),
    ("Boolean", "bool"),
    ("SByte", "sbyte"),
    ("Byte", "byte"),
    ("Int16", "short"),
    ("UInt16", "ushort"),
    ("Int32", "int"),
    ("UInt32", "uint"),
    ("Int64", "long"),
    ("UInt64", "ulong"),
    ("IntPtr", "nint"),
    ("UIntPtr", "nuint"),
    ("Single", "float"),
    ("Double", "double"),
    ("Decimal", "decimal"),
    ("Char", "char"),
    ("String", "string"),
];

/// The "any" marker some type systems surface as a global type.
pub const DYNAMIC: &str = "dynamic";

/// Reserved name for a non-nested, non-generic type, if it has one.
pub fn reserved_name(namespace: &str, name: &str) -> Option<&'static str> {
    if namespace == SYSTEM_NAMESPACE {
        return SYSTEM_TYPES
            .iter()
            .find(|(clr, _)| *clr == name)
            .map(|(_, short)| *short);
    }
    if namespace.is_empty() && name == DYNAMIC {
        return Some(DYNAMIC);
    }
    None
}
