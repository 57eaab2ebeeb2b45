#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        global is OK
        r#"
            var a = "before";
            print a;
            a = "after";
            print a;
        "# => "before", "after"
    }

    tests! {
        local is OK
        r#"
            {
                var a = "before";
                print a;
                a = "after";
                print a;
            }
        "# => "before", "after"
    }

    tests! {
        assignment_returns_the_assigned_value is OK
        r#"
            var a = 1;
            print a = 2;
        "# => "2"
    }

    tests! {
        chained_assignment_is_right_associative is OK
        r#"
            var a = 1;
            var b = 2;
            a = b = 3;
            print a;
            print b;
        "# => "3", "3"
    }

    tests! {
        grouping_is_not_a_valid_assignment_target is ERR
        "(a) = 1;" => "Invalid assignment target"
    }

    tests! {
        infix_operator_is_not_a_valid_assignment_target is ERR
        "a + b = 1;" => "Invalid assignment target"
    }

    tests! {
        prefix_operator_is_not_a_valid_assignment_target is ERR
        "!a = 1;" => "Invalid assignment target"
    }

    tests! {
        undefined_target_is_a_runtime_error is ERR
        "unknown = 1;" => "Undefined variable 'unknown'"
    }
}
