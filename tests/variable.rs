#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        a_local_cannot_collide_with_a_parameter is ERR
        r#"
            fun f(a) {
                var a = "later";
            }
        "# => "Already a variable with this name in this scope"
    }

    tests! {
        a_block_cannot_redeclare_the_same_local_twice is ERR
        r#"
            {
                var a = "first";
                var a = "second";
            }
        "# => "Already a variable with this name in this scope"
    }

    tests! {
        a_function_cannot_redeclare_the_same_parameter_twice is ERR
        "fun f(arg, arg) {}" => "Already a variable with this name in this scope"
    }

    tests! {
        a_global_function_can_be_referenced_before_its_own_declaration_line_via_a_later_call is OK
        r#"
            fun outer() {
                var a = "outer";
                fun inner() { print a; }
                inner();
            }
            outer();
        "# => "outer"
    }

    tests! {
        declaring_a_variable_mid_block_only_affects_statements_after_it is OK
        r#"
            var a = "a";
            print a;
            var b = a + " b";
            print b;
            var c = a + " c";
            print c;
            var d = a + " b" + " d";
            print d;
        "# => "a", "a b", "a c", "a b d"
    }

    tests! {
        a_block_inside_a_block_sees_the_outer_declaration is OK
        r#"
            var a = "outer";
            { print a; }
        "# => "outer"
    }

    tests! {
        a_method_can_declare_its_own_local_variable is OK
        r#"
            class Foo {
                bar() {
                    var a = "variable";
                    print a;
                }
            }
            Foo().bar();
        "# => "variable"
    }

    tests! {
        redeclaring_a_global_is_allowed is OK
        r#"
            var a;
            var a;
            print a;
        "# => "nil"
    }

    tests! {
        redefining_a_global_updates_its_value is OK
        r#"
            var a = 1;
            var a = 2;
            print a;
        "# => "2"
    }

    tests! {
        separate_blocks_may_each_declare_their_own_local_with_the_same_name is OK
        r#"
            { var a = "first"; print a; }
            { var a = "second"; print a; }
        "# => "first", "second"
    }

    tests! {
        a_block_local_shadows_the_enclosing_local is OK
        r#"
            {
                var a = "outer";
                print a;
                {
                    var a = "inner";
                    print a;
                }
            }
        "# => "outer", "inner"
    }

    tests! {
        a_block_local_shadows_a_global_of_the_same_name is OK
        r#"
            var a = "global";
            {
                var a = "shadow";
                print a;
            }
            print a;
        "# => "shadow", "global"
    }

    tests! {
        referencing_an_undefined_global_is_a_runtime_error is ERR
        "print notDefined;" => "Undefined variable 'notDefined'"
    }

    tests! {
        referencing_an_undefined_local_is_a_runtime_error is ERR
        r#"
            {
                print notDefined;
            }
        "# => "Undefined variable 'notDefined'"
    }

    tests! {
        a_declared_but_uninitialized_variable_is_nil is OK
        r#"
            var a;
            print a;
        "# => "nil"
    }

    tests! {
        an_undefined_reference_never_reached_does_not_error is OK
        r#"
            if (false) {
                print notDefined;
            }
            print "ok";
        "# => "ok"
    }

    tests! {
        false_is_not_a_valid_variable_name is ERR
        "var false = 1;" => "Expect variable name"
    }

    tests! {
        a_variable_initializer_cannot_read_the_variable_being_declared is ERR
        r#"
            var a = "outer";
            {
                var a = a;
            }
        "# => "Can't read local variable in its own initializer"
    }

    tests! {
        nil_is_not_a_valid_variable_name is ERR
        "var nil = 1;" => "Expect variable name"
    }

    tests! {
        this_is_not_a_valid_variable_name is ERR
        "var this = 1;" => "Expect variable name"
    }

    tests! {
        a_global_initializer_may_reference_another_global is OK
        r#"
            var a = "value";
            var b = a;
            print b;
        "# => "value"
    }
}
