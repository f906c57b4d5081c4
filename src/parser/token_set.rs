//! Sets of tokens
//!
//! `TokenSet` is a bitset with one bit per [`Token`]. All operations are
//! `const fn` so the grammar tables can be built at compile time. Iteration
//! yields members in token declaration order, which keeps rendered
//! "expected" lists stable.

use super::token::{TOKEN_COUNT, Token};
use std::fmt;

const _: () = assert!(TOKEN_COUNT <= 128);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    pub const fn new(tokens: &[Token]) -> TokenSet {
        let mut bits = 0u128;
        let mut i = 0;
        while i < tokens.len() {
            bits |= mask(tokens[i]);
            i += 1;
        }
        TokenSet(bits)
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }

    pub const fn with(self, token: Token) -> TokenSet {
        TokenSet(self.0 | mask(token))
    }

    pub const fn without(self, token: Token) -> TokenSet {
        TokenSet(self.0 & !mask(token))
    }

    pub const fn contains(&self, token: Token) -> bool {
        self.0 & mask(token) != 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_disjoint(&self, other: TokenSet) -> bool {
        self.0 & other.0 == 0
    }

    /// Members in token declaration order
    pub fn iter(&self) -> impl Iterator<Item = Token> + '_ {
        Token::ALL.iter().copied().filter(|t| self.contains(*t))
    }
}

const fn mask(token: Token) -> u128 {
    1u128 << (token as u16)
}

impl FromIterator<Token> for TokenSet {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        iter.into_iter().fold(TokenSet::EMPTY, TokenSet::with)
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let set = TokenSet::new(&[Token::END_KW, Token::SEMICOLON]);
        assert!(set.contains(Token::END_KW));
        assert!(set.contains(Token::SEMICOLON));
        assert!(!set.contains(Token::EOF));
        assert_eq!(set.len(), 2);
        assert!(!set.without(Token::END_KW).contains(Token::END_KW));
    }

    #[test]
    fn test_iteration_follows_declaration_order() {
        let set: TokenSet = [Token::EOF, Token::SEMICOLON, Token::AND_KW, Token::IDENT]
            .into_iter()
            .collect();
        let members: Vec<_> = set.iter().collect();
        assert_eq!(
            members,
            vec![Token::AND_KW, Token::IDENT, Token::SEMICOLON, Token::EOF]
        );
    }

    #[test]
    fn test_disjoint_and_union() {
        let a = TokenSet::new(&[Token::IF_KW]);
        let b = TokenSet::new(&[Token::WHILE_KW]);
        assert!(a.is_disjoint(b));
        assert!(!a.union(b).is_disjoint(b));
        assert!(TokenSet::EMPTY.is_empty());
    }
}
