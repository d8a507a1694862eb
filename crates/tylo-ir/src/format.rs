//! Human-readable rendering of IR types.
//!
//! `lang/collections/List<out lang/Number>?`, `*` for star arguments,
//! `<error>` for the error type, annotations as an `@Name(arg = value) `
//! prefix.

use crate::symbols::{IrClassifierSymbol, IrSymbolTable};
use crate::types::{IrConst, IrConstructorCall, IrType, IrTypeArgument};
use std::fmt::Write;

pub struct IrTypeFormatter<'a> {
    symbols: &'a IrSymbolTable,
}

impl<'a> IrTypeFormatter<'a> {
    pub fn new(symbols: &'a IrSymbolTable) -> Self {
        Self { symbols }
    }

    pub fn format(&self, ty: &IrType) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    fn write_type(&self, out: &mut String, ty: &IrType) {
        let IrType::Simple(simple) = ty else {
            out.push_str("<error>");
            return;
        };

        for annotation in &simple.annotations {
            self.write_annotation(out, annotation);
            out.push(' ');
        }
        self.write_classifier(out, simple.classifier);

        if !simple.arguments.is_empty() {
            out.push('<');
            for (index, argument) in simple.arguments.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                self.write_argument(out, argument);
            }
            out.push('>');
        }
        if simple.nullable {
            out.push('?');
        }
    }

    fn write_argument(&self, out: &mut String, argument: &IrTypeArgument) {
        match argument {
            IrTypeArgument::Star => out.push('*'),
            IrTypeArgument::Projection { variance, ty } => {
                let label = variance.label();
                if !label.is_empty() {
                    out.push_str(label);
                    out.push(' ');
                }
                self.write_type(out, ty);
            }
        }
    }

    fn write_classifier(&self, out: &mut String, classifier: IrClassifierSymbol) {
        match self.symbols.classifier_name(classifier) {
            Some(name) => out.push_str(&name),
            None => match classifier {
                IrClassifierSymbol::Class(class) => {
                    let _ = write!(out, "<class#{}>", class.0);
                }
                IrClassifierSymbol::TypeParameter(param) => {
                    let _ = write!(out, "<type-parameter#{}>", param.0);
                }
            },
        }
    }

    fn write_annotation(&self, out: &mut String, annotation: &IrConstructorCall) {
        out.push('@');
        self.write_classifier(out, IrClassifierSymbol::Class(annotation.annotation_class));
        if annotation.arguments.is_empty() {
            return;
        }
        out.push('(');
        for (index, (name, value)) in annotation.arguments.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let _ = match value {
                IrConst::Bool(value) => write!(out, "{name} = {value}"),
                IrConst::Int(value) => write!(out, "{name} = {value}"),
                IrConst::String(value) => write!(out, "{name} = {value:?}"),
            };
        }
        out.push(')');
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
