//! Human-readable descriptions of runtypes, used in error messages.

use std::fmt::{self, Display};

use crate::runtype::{Reflect, Runtype};

fn needs_parens(runtype: &Runtype) -> bool {
    matches!(runtype.reflect(), Reflect::Union(members) | Reflect::Intersect(members) if members.len() > 1)
}

fn write_joined(f: &mut fmt::Formatter<'_>, members: &[Runtype], sep: &str) -> fmt::Result {
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", member)?;
    }
    Ok(())
}

impl Display for Runtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect() {
            Reflect::Unknown => write!(f, "unknown"),
            Reflect::Never => write!(f, "never"),
            Reflect::Boolean => write!(f, "boolean"),
            Reflect::Number => write!(f, "number"),
            Reflect::String => write!(f, "string"),
            Reflect::Literal(value) => write!(f, "{}", value),
            Reflect::Array(array) => {
                if array.is_readonly() {
                    write!(f, "readonly ")?;
                }
                if needs_parens(array.element()) {
                    write!(f, "({})[]", array.element())
                } else {
                    write!(f, "{}[]", array.element())
                }
            }
            Reflect::Tuple(elements) => {
                write!(f, "[")?;
                write_joined(f, elements, ", ")?;
                write!(f, "]")
            }
            Reflect::Record(record) => {
                if record.fields().next().is_none() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, (name, field)) in record.fields().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    let shown = match field.reflect() {
                        Reflect::Optional(inner) => inner,
                        _ => field,
                    };
                    let marker = if record.is_optional(name) { "?" } else { "" };
                    write!(f, "{}{}: {}", name, marker, shown)?;
                }
                write!(f, " }}")
            }
            Reflect::Dictionary(value) => write!(f, "{{ [key: string]: {} }}", value),
            Reflect::Union(members) if members.is_empty() => write!(f, "never"),
            Reflect::Union(members) => write_joined(f, members, " | "),
            Reflect::Intersect(members) if members.is_empty() => write!(f, "unknown"),
            Reflect::Intersect(members) => write_joined(f, members, " & "),
            Reflect::Optional(inner) => write!(f, "{} | undefined", inner),
            Reflect::Constraint(constraint) => match constraint.name() {
                Some(name) => write!(f, "{}", name),
                None => write!(f, "{}", constraint.underlying()),
            },
            Reflect::Reference(reference) => write!(f, "{}", reference.name()),
            Reflect::Custom(custom) => write!(f, "{}", custom.tag()),
        }
    }
}

impl fmt::Debug for Runtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Runtype({}: {})", self.tag(), self)
    }
}

#[cfg(test)]
mod tests {
    use crate::Runtype;
    use serde_json::json;

    #[test]
    fn test_show_arrays() {
        let numbers = Runtype::array(Runtype::number());
        assert_eq!(numbers.to_string(), "number[]");
        assert_eq!(numbers.as_readonly().unwrap().to_string(), "readonly number[]");

        let mixed = Runtype::array(Runtype::string().or(Runtype::number()));
        assert_eq!(mixed.to_string(), "(string | number)[]");
        assert_eq!(Runtype::array(Runtype::array(Runtype::boolean())).to_string(), "boolean[][]");
    }

    #[test]
    fn test_show_record_and_literals() {
        let user = Runtype::record([
            ("kind", Runtype::literal(json!("user"))),
            ("age", Runtype::optional(Runtype::number())),
        ]);
        assert_eq!(user.to_string(), "{ kind: \"user\"; age?: number }");
        assert_eq!(Runtype::record(Vec::<(String, Runtype)>::new()).to_string(), "{}");
        assert_eq!(Runtype::tuple([Runtype::null(), Runtype::unknown()]).to_string(), "[null, unknown]");
    }

    #[test]
    fn test_debug_includes_tag() {
        let numbers = Runtype::array(Runtype::number());
        assert_eq!(format!("{:?}", numbers), "Runtype(array: number[])");
    }
}
