#[macro_use]
mod common;

#[cfg(test)]
mod misc {
    tests! {
        empty_source_produces_no_output is OK
        "" =>
    }

    tests! {
        arithmetic_and_comparison_operators_follow_the_usual_precedence is OK
        r#"
            print 2 + 3 * 4;
            print (2 + 3) * 4 / 2.5;
            print 2 + 2 == 4;
            print !(5 - 4 > 3 * 2 == !nil);
        "# => "14", "8", "true", "true"
    }

    tests! {
        an_unexpected_character_is_a_lex_error is ERR
        "print 1 | 2;" => "Unexpected character \"|\""
    }
}
