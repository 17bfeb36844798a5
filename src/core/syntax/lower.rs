//! Lowering of a parsed swc `Module` into a [`SyntaxTree`].
//!
//! Every expression becomes exactly one node, so a literal's parent in the
//! arena is the same construct an ESTree-shaped tree would report. Statements
//! and any construct without a dedicated kind become `Other` nodes.
//! Parenthesized expressions are transparent.

use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{
    CallExpr, Callee, Expr, ExprOrSpread, ImportDecl, JSXAttr, JSXAttrName, JSXAttrValue,
    JSXElement, JSXExprContainer, JSXFragment, JSXText, Lit, Module, ModuleDecl,
    ModuleExportName, ModuleItem, ObjectLit, OptCall, OptChainBase, OptChainExpr, Prop,
    PropName, Stmt, Tpl,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::tree::{ImportSpecifier, NodeId, NodeKind, SyntaxTree, TextRange};

/// Build the arena tree for `module`.
///
/// `source` must be the exact text the module was parsed from and `start_pos`
/// the `SourceFile::start_pos` it was registered at.
pub fn lower_module(module: &Module, source: impl Into<String>, start_pos: BytePos) -> SyntaxTree {
    let tree = SyntaxTree::new(source);
    let root = tree.root();
    let mut lowerer = Lowerer {
        tree,
        start_pos,
        parents: vec![root],
    };
    module.visit_with(&mut lowerer);
    lowerer.tree
}

struct Lowerer {
    tree: SyntaxTree,
    start_pos: BytePos,
    parents: Vec<NodeId>,
}

impl Lowerer {
    fn range(&self, span: Span) -> TextRange {
        let start = span.lo.0.saturating_sub(self.start_pos.0) as usize;
        let end = span.hi.0.saturating_sub(self.start_pos.0) as usize;
        TextRange::new(start, end.max(start))
    }

    fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let parent = self.parents.last().copied().unwrap_or(self.tree.root());
        let range = self.range(span);
        self.tree.push(kind, parent, range)
    }

    fn within(&mut self, parent: NodeId, f: impl FnOnce(&mut Self)) {
        self.parents.push(parent);
        f(self);
        self.parents.pop();
    }

    fn lower_expr(&mut self, expr: &Expr) -> NodeId {
        match expr {
            Expr::Paren(paren) => self.lower_expr(&paren.expr),
            Expr::Lit(Lit::Str(s)) => self.alloc(
                NodeKind::StringLiteral {
                    value: s.value.to_string_lossy().to_string(),
                },
                s.span,
            ),
            Expr::Tpl(tpl) => self.lower_template(tpl),
            Expr::Call(call) => self.lower_call(call),
            Expr::OptChain(OptChainExpr { base, .. }) => match &**base {
                OptChainBase::Call(call) => self.lower_opt_call(call),
                OptChainBase::Member(_) => self.lower_other(expr),
            },
            Expr::Object(obj) => self.lower_object(obj),
            Expr::JSXElement(el) => self.lower_jsx_element(el),
            Expr::JSXFragment(frag) => self.lower_jsx_fragment(frag),
            _ => self.lower_other(expr),
        }
    }

    fn lower_other(&mut self, expr: &Expr) -> NodeId {
        let id = self.alloc(NodeKind::Other, expr.span());
        self.within(id, |this| expr.visit_children_with(this));
        id
    }

    fn lower_call(&mut self, call: &CallExpr) -> NodeId {
        let callee = match &call.callee {
            Callee::Expr(expr) => ident_name(expr),
            _ => None,
        };
        self.lower_call_parts(callee, call.span, &call.args, |this| {
            call.callee.visit_with(this)
        })
    }

    /// `i18n?.(...)` lowers to the same node as a plain call.
    fn lower_opt_call(&mut self, call: &OptCall) -> NodeId {
        self.lower_call_parts(ident_name(&call.callee), call.span, &call.args, |this| {
            this.lower_expr(&call.callee);
        })
    }

    fn lower_call_parts(
        &mut self,
        callee: Option<String>,
        span: Span,
        args: &[ExprOrSpread],
        lower_callee: impl FnOnce(&mut Self),
    ) -> NodeId {
        let id = self.alloc(
            NodeKind::CallExpression {
                callee,
                arguments: Vec::new(),
            },
            span,
        );

        let mut arguments = Vec::with_capacity(args.len());
        self.within(id, |this| {
            lower_callee(this);
            for arg in args {
                arguments.push(this.lower_expr(&arg.expr));
            }
        });
        self.tree.set_call_arguments(id, arguments);
        id
    }

    fn lower_object(&mut self, obj: &ObjectLit) -> NodeId {
        let id = self.alloc(NodeKind::ObjectLiteral, obj.span);
        self.within(id, |this| obj.visit_children_with(this));
        id
    }

    fn lower_template(&mut self, tpl: &Tpl) -> NodeId {
        let id = self.alloc(NodeKind::Template, tpl.span);
        self.within(id, |this| {
            // quasis and exprs alternate in the source, starting with a quasi
            for (i, quasi) in tpl.quasis.iter().enumerate() {
                this.alloc(
                    NodeKind::TemplateSegment {
                        raw: quasi.raw.to_string(),
                    },
                    quasi.span,
                );
                if let Some(expr) = tpl.exprs.get(i) {
                    this.lower_expr(expr);
                }
            }
        });
        id
    }

    fn lower_jsx_element(&mut self, el: &JSXElement) -> NodeId {
        let id = self.alloc(NodeKind::JsxElement, el.span);
        self.within(id, |this| el.visit_children_with(this));
        id
    }

    fn lower_jsx_fragment(&mut self, frag: &JSXFragment) -> NodeId {
        let id = self.alloc(NodeKind::JsxElement, frag.span);
        self.within(id, |this| frag.visit_children_with(this));
        id
    }
}

fn ident_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(ident) => Some(ident.sym.to_string()),
        _ => None,
    }
}

fn import_declaration(import: &ImportDecl) -> NodeKind {
    let specifiers = import
        .specifiers
        .iter()
        .map(|specifier| match specifier {
            swc_ecma_ast::ImportSpecifier::Named(named) => {
                let local = named.local.sym.to_string();
                let imported = named
                    .imported
                    .as_ref()
                    .map(|i| match i {
                        ModuleExportName::Ident(ident) => ident.sym.to_string(),
                        ModuleExportName::Str(s) => s.value.to_string_lossy().to_string(),
                    })
                    .unwrap_or_else(|| local.clone());
                ImportSpecifier::Named { local, imported }
            }
            swc_ecma_ast::ImportSpecifier::Default(default) => ImportSpecifier::Default {
                local: default.local.sym.to_string(),
            },
            swc_ecma_ast::ImportSpecifier::Namespace(ns) => ImportSpecifier::Namespace {
                local: ns.local.sym.to_string(),
            },
        })
        .collect();

    NodeKind::ImportDeclaration {
        source: import.src.value.to_string_lossy().to_string(),
        specifiers,
    }
}

fn prop_key(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(|s| s.to_string()),
        _ => None,
    }
}

fn attr_name(name: &JSXAttrName) -> String {
    match name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

impl Visit for Lowerer {
    fn visit_module_item(&mut self, item: &ModuleItem) {
        if let ModuleItem::ModuleDecl(ModuleDecl::Import(import)) = item {
            self.alloc(import_declaration(import), import.span);
            return;
        }
        let id = self.alloc(NodeKind::Other, item.span());
        self.within(id, |this| item.visit_children_with(this));
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        let id = self.alloc(NodeKind::Other, stmt.span());
        self.within(id, |this| stmt.visit_children_with(this));
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.lower_expr(expr);
    }

    fn visit_tpl(&mut self, tpl: &Tpl) {
        self.lower_template(tpl);
    }

    fn visit_prop(&mut self, prop: &Prop) {
        match prop {
            Prop::KeyValue(kv) => {
                let id = self.alloc(
                    NodeKind::ObjectProperty {
                        key: prop_key(&kv.key),
                    },
                    prop.span(),
                );
                self.within(id, |this| {
                    kv.key.visit_with(this);
                    this.lower_expr(&kv.value);
                });
            }
            _ => {
                let id = self.alloc(NodeKind::Other, prop.span());
                self.within(id, |this| prop.visit_children_with(this));
            }
        }
    }

    fn visit_jsx_element(&mut self, el: &JSXElement) {
        self.lower_jsx_element(el);
    }

    fn visit_jsx_fragment(&mut self, frag: &JSXFragment) {
        self.lower_jsx_fragment(frag);
    }

    fn visit_jsx_text(&mut self, text: &JSXText) {
        self.alloc(
            NodeKind::JsxText {
                value: text.value.to_string(),
            },
            text.span,
        );
    }

    fn visit_jsx_expr_container(&mut self, container: &JSXExprContainer) {
        let id = self.alloc(NodeKind::Other, container.span);
        self.within(id, |this| container.visit_children_with(this));
    }

    fn visit_jsx_attr(&mut self, attr: &JSXAttr) {
        let id = self.alloc(
            NodeKind::JsxAttribute {
                name: attr_name(&attr.name),
            },
            attr.span,
        );
        self.within(id, |this| match &attr.value {
            Some(JSXAttrValue::Str(s)) => {
                this.alloc(
                    NodeKind::StringLiteral {
                        value: s.value.to_string_lossy().to_string(),
                    },
                    s.span,
                );
            }
            Some(value) => value.visit_with(this),
            None => {}
        });
    }
}
