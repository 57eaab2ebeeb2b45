#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        a_trailing_dot_with_no_following_digit_is_reinterpreted_as_property_access is ERR
        "print 123.;" => "Expect property name after '.'"
    }

    tests! {
        a_leading_dot_is_not_a_valid_start_of_an_expression is ERR
        "print .123;" => "Expect expression"
    }

    tests! {
        integer_and_decimal_literals_print_without_surprises is OK
        r#"
            print 123;
            print 987654;
            print 0;
            print -0;
            print 123.456;
            print -0.001;
        "# => "123", "987654", "0", "-0", "123.456", "-0.001"
    }

    tests! {
        nan_compares_unequal_to_everything_including_itself is OK
        r#"
            var nan = 0.0 / 0.0;
            print nan == nan;
            print nan != nan;
            print nan == 1;
            print nan != 1;
        "# => "false", "true", "false", "true"
    }

    tests! {
        a_dot_followed_by_a_digit_is_a_fractional_part_not_a_property_access is OK
        r#"
            class Foo {}
            var foo = Foo();
            print 1.5;
        "# => "1.5"
    }
}
