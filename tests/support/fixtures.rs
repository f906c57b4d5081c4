//! Modula-2 sources used across the integration tests.

pub const LISTS_DEF: &str = r#"DEFINITION MODULE Lists;
IMPORT Storage;
FROM SYSTEM IMPORT ADDRESS, WORD;
CONST Max = 100;
TYPE List; Index = [0..Max];
VAR head : List;
PROCEDURE Append(VAR l : List; x : INTEGER) : BOOLEAN;
END Lists.
"#;

pub const HELLO_MOD: &str = r#"MODULE Hello;
FROM InOut IMPORT WriteString, WriteLn;
BEGIN
  WriteString('Hello');
  WriteLn
END Hello.
"#;

pub const OUTER_MOD: &str = r#"MODULE Outer;
MODULE Inner [2];
  IMPORT Outer;
  EXPORT QUALIFIED Get;
  PROCEDURE Get() : INTEGER;
  BEGIN RETURN 1
  END Get;
END Inner;
END Outer.
"#;

pub const SHAPES_PIM_DEF: &str = r#"DEFINITION MODULE Shapes;
TYPE
  Kind = (circle, square);
  Point = RECORD x, y : REAL END;
  Shape = RECORD
    x, y : INTEGER;
    CASE kind : Kind OF
      circle : r : REAL
    | square : side : REAL
    END
  END;
END Shapes.
"#;

pub const BUFFERS_EXT_MOD: &str = r#"IMPLEMENTATION MODULE Buffers;
TYPE Buffer = VAR RECORD size : CARDINAL IN data : ARRAY size OF CHAR END;
END Buffers.
"#;

pub const STRINGS_EXT_DEF: &str = r#"DEFINITION MODULE Strings;
PROCEDURE Length(CONST s : ARRAY OF CHAR) : CARDINAL;
END Strings.
"#;
