use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first), without recursion.
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    stack: Vec<&'a Expr>,
    last_visited: Option<&'a Expr>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator rooted at the given expression.
    pub fn new(expr: &'a Expr) -> Self {
        Self {
            stack: vec![expr],
            last_visited: None,
        }
    }

    /// Pops the current expression in the stack and marks it as the last visited expression.
    fn visit(&mut self) -> Option<&'a Expr> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given expression is the last visited expression.
    fn is_last_visited(&self, expr: &'a Expr) -> bool {
        self.last_visited.is_some_and(|last_visited| std::ptr::eq(last_visited, expr))
    }

    /// Visits the top of the stack if its last child was just visited; otherwise pushes the
    /// children so the leftmost is visited first.
    fn descend(&mut self, children: &'a [Expr]) -> Option<Option<&'a Expr>> {
        match children.last() {
            Some(last) if !self.is_last_visited(last) => {
                self.stack.extend(children.iter().rev());
                None
            },
            _ => Some(self.visit()),
        }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let expr = *self.stack.last()?;
            match expr {
                Expr::Number(_)
                | Expr::Constant(_)
                | Expr::Variable(_)
                | Expr::Derivative { .. } => return self.visit(),
                Expr::Sum(children) | Expr::Product(children) => {
                    if let Some(visited) = self.descend(children) {
                        return visited;
                    }
                },
                Expr::Power(lhs, rhs) | Expr::Log(lhs, rhs) => {
                    if self.is_last_visited(rhs) {
                        return self.visit();
                    }
                    self.stack.push(rhs);
                    self.stack.push(lhs);
                },
                Expr::Call(_, arg) => {
                    if self.is_last_visited(arg) {
                        return self.visit();
                    }
                    self.stack.push(arg);
                },
            }
        }
    }
}
