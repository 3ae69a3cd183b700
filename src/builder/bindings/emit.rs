//! Rendering of the Julia declarations.
//!
//! Each `emit_*` function appends one section to the artifact it is given.
//! Sections are emitted in a fixed order; only the type names and sizes
//! inside them depend on the platform.

use crate::builder::bindings::artifact::{Artifact, Decl};
use crate::builder::bindings::probe::Platform;
use crate::builder::bindings::resolve::{AliasResolver, AliasStyle};
use crate::core::abi::{AbiError, MeasuredRepresentation};
use crate::core::native::{self, CameraState, ConstValue, Status, SymbolicConstant};
use crate::core::registry::TypeRegistry;
use crate::util::config::Config;

/// Name of the element type dispatch function.
pub const ELTYPE_FUNCTION: &str = "shared_array_eltype";

/// Everything the emitter reads.
pub struct EmitContext<'a> {
    pub registry: &'a TypeRegistry,
    pub platform: &'a Platform,
    pub config: &'a Config,
    resolver: AliasResolver,
}

impl<'a> EmitContext<'a> {
    pub fn new(registry: &'a TypeRegistry, platform: &'a Platform, config: &'a Config) -> Self {
        EmitContext {
            registry,
            platform,
            config,
            resolver: AliasResolver::new(platform),
        }
    }

    fn alias(&self, repr: &MeasuredRepresentation, style: AliasStyle) -> Result<String, AbiError> {
        self.resolver.resolve(repr, style)
    }

    /// Docstring text prefixed with the qualified name of a constant.
    fn documented(&self, name: &str, text: &str) -> Decl {
        Decl::doc(format!("`{}.{}` {}", self.config.library.module, name, text))
    }
}

/// Append every section of the bindings to `out`.
pub fn emit_bindings(ctx: &EmitContext<'_>, out: &mut Artifact) -> Result<(), AbiError> {
    emit_header(ctx, out);
    emit_library_path(ctx, out);
    emit_status(ctx, out)?;
    emit_shmid(ctx, out)?;
    emit_enum_alias(ctx, out)?;
    emit_object_types(ctx, out);
    emit_capacities(ctx, out);
    emit_eltype_union(ctx, out);
    emit_eltype_tuple(ctx, out);
    emit_eltype_dispatch(ctx, out)?;
    emit_eltype_table(ctx, out);
    emit_timespec(ctx, out)?;
    emit_camera_states(ctx, out)?;
    Ok(())
}

fn emit_header(ctx: &EmitContext<'_>, out: &mut Artifact) {
    let output = &ctx.config.output;
    let library = &ctx.config.library;
    out.push(Decl::comment(""))
        .push(Decl::comment(format!("{} --", output.file_name)))
        .push(Decl::comment(""))
        .push(Decl::comment(format!(
            "Definitions for the Julia interface to the {} C library.",
            library.name
        )))
        .push(Decl::comment(""))
        .push(Decl::comment(
            "*IMPORTANT* This file has been automatically generated by `gendeps`, do",
        ))
        .push(Decl::comment(
            "            not edit it directly but rather regenerate it.",
        ))
        .push(Decl::comment(""));
}

fn emit_library_path(ctx: &EmitContext<'_>, out: &mut Artifact) {
    let library = &ctx.config.library;
    out.push(Decl::Blank)
        .push(Decl::comment(format!(
            "Path to the core {} dynamic library:",
            library.name
        )))
        .push(Decl::constant(
            library.path_constant.as_str(),
            julia_string(&library.path),
        ));
}

fn emit_status(ctx: &EmitContext<'_>, out: &mut Artifact) -> Result<(), AbiError> {
    let alias = ctx.alias(&ctx.platform.status, AliasStyle::NativeCall)?;
    out.push(Decl::Blank)
        .push(Decl::comment("Possible return values for an operation:"))
        .push(Decl::Struct {
            name: "Status".into(),
            field: "val".into(),
            ty: alias,
        });
    for status in Status::ALL {
        out.push(Decl::Const {
            name: status.name().into(),
            pad: 7,
            value: format!("Status({:2})", status as i32),
            note: None,
        });
    }
    Ok(())
}

fn emit_shmid(ctx: &EmitContext<'_>, out: &mut Artifact) -> Result<(), AbiError> {
    let alias = ctx.alias(&ctx.platform.shmid, AliasStyle::FixedWidth)?;
    out.push(Decl::Blank)
        .push(Decl::comment("Type used to store a shared memory identifier:"))
        .push(Decl::constant("ShmId", alias))
        .push(Decl::Blank)
        .push(ctx.documented(
            "BAD_SHMID",
            "is used to denote an invalid shared memory identifier.",
        ))
        .push(Decl::constant(
            "BAD_SHMID",
            format!("ShmId({})", native::BAD_SHMID),
        ));
    Ok(())
}

fn emit_enum_alias(ctx: &EmitContext<'_>, out: &mut Artifact) -> Result<(), AbiError> {
    let alias = ctx.alias(&ctx.platform.c_enum, AliasStyle::NativeCall)?;
    out.push(Decl::Blank)
        .push(Decl::comment("Julia type corresponding to a C enumeration:"))
        .push(Decl::constant("Cenum", alias));
    Ok(())
}

fn emit_object_types(ctx: &EmitContext<'_>, out: &mut Artifact) {
    let digits = 2 * ctx.platform.object_type.size();
    emit_documented(ctx, out, &native::object_type_tags(), digits);
}

fn emit_capacities(ctx: &EmitContext<'_>, out: &mut Artifact) {
    emit_documented(ctx, out, &native::capacity_limits(), 0);
}

fn emit_documented(
    ctx: &EmitContext<'_>,
    out: &mut Artifact,
    constants: &[SymbolicConstant],
    hex_digits: usize,
) {
    for constant in constants {
        out.push(Decl::Blank)
            .push(ctx.documented(constant.name, constant.doc))
            .push(Decl::constant(
                constant.name,
                render_value(constant.value, hex_digits),
            ));
    }
}

fn emit_eltype_union(ctx: &EmitContext<'_>, out: &mut Artifact) {
    let items = ctx
        .registry
        .entries()
        .iter()
        .map(|e| e.alias.to_string())
        .collect();
    out.push(Decl::Blank)
        .push(Decl::comment(format!(
            "Union of all element types of {} shared arrays.",
            ctx.config.library.name
        )))
        .push(Decl::List {
            name: "SharedArrayElementTypes".into(),
            open: "Union{",
            close: "}",
            items,
            per_line: ctx.config.output.items_per_line,
        });
}

fn emit_eltype_tuple(ctx: &EmitContext<'_>, out: &mut Artifact) {
    let items: Vec<String> = (1..=ctx.registry.len())
        .map(|id| match ctx.registry.by_code(id as i64) {
            Some(entry) => entry.alias.to_string(),
            None => "Nothing".to_string(),
        })
        .collect();
    let close = if items.len() == 1 { ",)" } else { ")" };
    out.push(Decl::Blank)
        .push(Decl::comment(format!(
            "List of all element types of {} shared arrays (can be indexed",
            ctx.config.library.name
        )))
        .push(Decl::comment(format!(
            "by {} element type identifier).",
            ctx.config.library.name
        )))
        .push(Decl::List {
            name: "SHARED_ARRAY_ELTYPES".into(),
            open: "(",
            close,
            items,
            per_line: ctx.config.output.items_per_line,
        });
}

fn emit_eltype_dispatch(ctx: &EmitContext<'_>, out: &mut Artifact) -> Result<(), AbiError> {
    let alias = ctx.alias(&ctx.platform.c_int, AliasStyle::NativeCall)?;
    let library = &ctx.config.library;
    out.push(Decl::Blank).push(Decl::doc(format!(
        "    {}.{}(T) -> id\n\n\
         yields the element type code of {} shared array corresponding to Julia\n\
         type `T`.  An error is raised if `T` is not supported.",
        library.module, ELTYPE_FUNCTION, library.name
    )));
    for entry in ctx.registry.entries() {
        out.push(Decl::Dispatch {
            function: ELTYPE_FUNCTION.into(),
            ty: entry.alias.into(),
            value: format!("{}({})", alias, entry.code),
        });
    }
    out.push(Decl::Fallback {
        function: ELTYPE_FUNCTION.into(),
    });
    Ok(())
}

fn emit_eltype_table(ctx: &EmitContext<'_>, out: &mut Artifact) {
    let pad = ctx
        .registry
        .entries()
        .iter()
        .map(|e| "ELTYPE_".len() + e.name.len())
        .max()
        .unwrap_or(0);
    out.push(Decl::Blank).push(Decl::comment(
        "Identifiers of the type of the elements in an array.",
    ));
    for entry in ctx.registry.entries() {
        out.push(Decl::Const {
            name: format!("ELTYPE_{}", entry.name),
            pad,
            value: format!("{:2}", entry.code),
            note: Some(entry.description.into()),
        });
    }
}

fn emit_timespec(ctx: &EmitContext<'_>, out: &mut Artifact) -> Result<(), AbiError> {
    let layout = &ctx.platform.timespec;
    out.push(Decl::Blank).push(Decl::comment(format!(
        "Julia types of the members of the C `{}` structure.",
        layout.name
    )));
    for field in &layout.fields {
        out.push(Decl::constant(
            format!("_typeof_{}_{}", layout.name, short_field_name(field.field)),
            ctx.alias(&field.repr, AliasStyle::FixedWidth)?,
        ));
    }

    out.push(Decl::Blank)
        .push(Decl::comment(format!(
            "Size and member offsets (in bytes) of the C `{}` structure.",
            layout.name
        )))
        .push(Decl::constant(
            format!("_sizeof_{}", layout.name),
            layout.size.to_string(),
        ));
    for field in &layout.fields {
        out.push(Decl::constant(
            format!("_offsetof_{}_{}", layout.name, short_field_name(field.field)),
            field.offset.to_string(),
        ));
    }
    Ok(())
}

fn emit_camera_states(ctx: &EmitContext<'_>, out: &mut Artifact) -> Result<(), AbiError> {
    let alias = ctx.alias(&ctx.platform.c_int, AliasStyle::NativeCall)?;
    out.push(Decl::Blank)
        .push(Decl::comment("The different possible camera states."));
    for state in CameraState::ALL {
        out.push(Decl::Const {
            name: state.name().into(),
            pad: 25,
            value: format!("{}({})", alias, state as i32),
            note: None,
        });
    }
    Ok(())
}

/// Member name without the conventional `tv_`-style prefix.
fn short_field_name(field: &str) -> &str {
    match field.split_once('_') {
        Some((_, rest)) if !rest.is_empty() => rest,
        _ => field,
    }
}

/// Julia literal for a constant.
///
/// Bit patterns are written in hexadecimal, zero-padded to `hex_digits`, so
/// that their width stays visible and Julia parses them as unsigned integers
/// of that width.
pub fn render_value(value: ConstValue, hex_digits: usize) -> String {
    match value {
        ConstValue::Int(v) => v.to_string(),
        ConstValue::Bits(v) => format!("0x{:0width$x}", v, width = hex_digits),
        ConstValue::Str(s) => julia_string(s),
    }
}

/// Quote a string for Julia, escaping interpolation.
fn julia_string(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' | '$' => {
                quoted.push('\\');
                quoted.push(c);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
